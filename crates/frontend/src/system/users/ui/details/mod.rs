use contracts::system::users::{ChangePasswordDto, CreateUserDto};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::toast::use_toast;
use crate::system::users::api;

#[component]
pub fn CreateUserForm<F1, F2>(on_close: F1, on_created: F2) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn() + 'static + Copy + Send + Sync,
{
    let toast = use_toast();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_superuser, set_is_superuser) = signal(false);
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_saving, set_is_saving) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let dto = CreateUserDto {
            username: username.get().trim().to_string(),
            password: password.get(),
            is_superuser: is_superuser.get(),
        };
        if let Err(e) = dto.validate() {
            set_error_message.set(Some(e.to_string()));
            return;
        }

        set_is_saving.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::create_user(&dto).await {
                Ok(()) => {
                    toast.success("Usuario creado");
                    on_created();
                }
                Err(e) => {
                    set_error_message.set(Some(e));
                    set_is_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal-content" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>"Crear usuario"</h3>
                    <button class="btn-close" on:click=move |_| on_close()>"×"</button>
                </div>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="new-username">"Usuario *"</label>
                        <input
                            type="text"
                            id="new-username"
                            value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="new-password">"Contraseña *"</label>
                        <input
                            type="password"
                            id="new-password"
                            value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <div class="form-group">
                        <label>
                            <input
                                type="checkbox"
                                checked=move || is_superuser.get()
                                on:change=move |ev| set_is_superuser.set(event_target_checked(&ev))
                                disabled=move || is_saving.get()
                            />
                            " Superusuario"
                        </label>
                    </div>

                    <div class="form-actions">
                        <button
                            type="button"
                            class="btn-secondary"
                            on:click=move |_| on_close()
                            disabled=move || is_saving.get()
                        >
                            "Cancelar"
                        </button>
                        <button
                            type="submit"
                            class="btn-primary"
                            disabled=move || is_saving.get()
                        >
                            {move || if is_saving.get() { "Guardando..." } else { "Crear usuario" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

/// Change the signed-in user's own password
#[component]
pub fn ChangePasswordForm<F>(on_close: F) -> impl IntoView
where
    F: Fn() + 'static + Copy + Send + Sync,
{
    let toast = use_toast();
    let (old_password, set_old_password) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_saving, set_is_saving) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let dto = ChangePasswordDto {
            old_password: old_password.get(),
            new_password: new_password.get(),
        };
        if let Err(e) = dto.validate() {
            set_error_message.set(Some(e.to_string()));
            return;
        }

        set_is_saving.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::change_password(&dto).await {
                Ok(()) => {
                    toast.success("Contraseña cambiada");
                    on_close();
                }
                Err(e) => {
                    set_error_message.set(Some(e));
                    set_is_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal-content" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>"Cambiar mi contraseña"</h3>
                    <button class="btn-close" on:click=move |_| on_close()>"×"</button>
                </div>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="old-password">"Contraseña actual"</label>
                        <input
                            type="password"
                            id="old-password"
                            value=move || old_password.get()
                            on:input=move |ev| set_old_password.set(event_target_value(&ev))
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="changed-password">"Nueva contraseña"</label>
                        <input
                            type="password"
                            id="changed-password"
                            value=move || new_password.get()
                            on:input=move |ev| set_new_password.set(event_target_value(&ev))
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <div class="form-actions">
                        <button
                            type="button"
                            class="btn-secondary"
                            on:click=move |_| on_close()
                            disabled=move || is_saving.get()
                        >
                            "Cancelar"
                        </button>
                        <button
                            type="submit"
                            class="btn-primary"
                            disabled=move || is_saving.get()
                        >
                            {move || if is_saving.get() { "Cambiando..." } else { "Cambiar" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
