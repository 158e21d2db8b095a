use contracts::domain::a001_store::Store;
use contracts::system::users::{ResetPasswordDto, User, UserId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::{ChangePasswordForm, CreateUserForm};
use super::permissions::{store_label, UserPermissions};
use crate::domain::a001_store::api as store_api;
use crate::shared::components::ui::{Badge, BadgeVariant};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::shared::toast::use_toast;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::auth::guard::RequireSuperuser;
use crate::system::users::api;

/// Text typed into a browser prompt; cancelled or blank input yields nothing
pub fn prompted_password(input: Option<String>) -> Option<String> {
    input.filter(|value| !value.trim().is_empty())
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let (stores, set_stores) = signal(Vec::<Store>::new());
    let (show_change_password, set_show_change_password) = signal(false);

    spawn_local(async move {
        match store_api::fetch_stores().await {
            Ok(list) => set_stores.set(list),
            Err(e) => log::warn!("stores for account permissions: {}", e),
        }
    });

    let logout = move || {
        spawn_local(async move {
            do_logout(set_auth_state).await;
        });
    };

    view! {
        <PageFrame page_id="sys_users--list".to_string() category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <h1 class="page__title">"Usuarios"</h1>
            </div>

            <div class="page__content">
                <div class="account-card">
                    <div>
                        <strong>{move || auth_state.get().user.map(|u| u.username).unwrap_or_default()}</strong>
                        <Show when=move || auth_state.get().is_superuser()>
                            " "
                            <Badge variant=BadgeVariant::Success>"Superusuario"</Badge>
                        </Show>
                    </div>
                    <ul class="account-card__permissions">
                        {move || {
                            let permissions = auth_state.get().user.map(|u| u.permissions).unwrap_or_default();
                            permissions.into_iter().map(|permission| {
                                let store = stores.with(|list| store_label(list, permission.store));
                                let granted = permission.flags.granted_labels().join(", ");
                                view! { <li>{format!("{}: {}", store, granted)}</li> }
                            }).collect_view()
                        }}
                    </ul>
                    <Flex gap=FlexGap::Small>
                        <Button on_click=move |_| set_show_change_password.set(true)>
                            "Cambiar contraseña"
                        </Button>
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| logout()>
                            "Cerrar sesión"
                        </Button>
                    </Flex>
                </div>

                <Show when=move || show_change_password.get()>
                    <ChangePasswordForm on_close=move || set_show_change_password.set(false) />
                </Show>

                <RequireSuperuser>
                    <UsersList />
                </RequireSuperuser>
            </div>
        </PageFrame>
    }
}

#[component]
fn UsersList() -> impl IntoView {
    let toast = use_toast();
    let (users, set_users) = signal(Vec::<User>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (show_create_form, set_show_create_form) = signal(false);
    let managing: RwSignal<Option<User>> = RwSignal::new(None);

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_users().await {
                Ok(data) => set_users.set(data),
                Err(e) => set_error.set(Some(format!("No se pudieron cargar los usuarios: {}", e))),
            }
            set_loading.set(false);
        });
    };

    let reset_password = move |user: User| {
        let input = web_sys::window().and_then(|w| {
            w.prompt_with_message(&format!("Nueva contraseña para {}", user.username))
                .ok()
                .flatten()
        });
        let Some(new_password) = prompted_password(input) else {
            return;
        };
        let dto = ResetPasswordDto { new_password };
        spawn_local(async move {
            match api::reset_password(user.id, &dto).await {
                Ok(()) => toast.success("Contraseña reseteada"),
                Err(e) => toast.error(e),
            }
        });
    };

    let remove = move |id: UserId, username: String| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!(
                    "¿Eliminar usuario {}? Esta acción no se puede deshacer.",
                    username
                ))
                .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_user(id).await {
                Ok(()) => {
                    toast.success("Usuario eliminado");
                    load_data();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    load_data();

    view! {
        <div class="page__header">
            <h2>"Gestión de usuarios"</h2>
            <Flex gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| set_show_create_form.set(true)
                >
                    "Nuevo"
                </Button>
                <Button
                    on_click=move |_| load_data()
                    disabled=Signal::derive(move || loading.get())
                >
                    {move || if loading.get() { "Cargando..." } else { "Actualizar" }}
                </Button>
            </Flex>
        </div>

        {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}

        <Table>
            <TableHeader>
                <TableRow>
                    <TableHeaderCell min_width=80.0>"ID"</TableHeaderCell>
                    <TableHeaderCell resizable=true min_width=200.0>"Usuario"</TableHeaderCell>
                    <TableHeaderCell min_width=120.0>"Superusuario"</TableHeaderCell>
                    <TableHeaderCell min_width=280.0>"Acciones"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {move || users.get().into_iter().map(|user| {
                    let id = user.id;
                    let username = user.username.clone();
                    let for_reset = user.clone();
                    let for_permissions = user.clone();
                    view! {
                        <TableRow>
                            <TableCell><TableCellLayout>{id.to_string()}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{user.username.clone()}</TableCellLayout></TableCell>
                            <TableCell>
                                <TableCellLayout>{if user.is_superuser { "Sí" } else { "No" }}</TableCellLayout>
                            </TableCell>
                            <TableCell>
                                <TableCellLayout>
                                    <Button size=ButtonSize::Small on_click=move |_| reset_password(for_reset.clone())>
                                        "Resetear contraseña"
                                    </Button>
                                    <Button size=ButtonSize::Small on_click=move |_| managing.set(Some(for_permissions.clone()))>
                                        "Permisos"
                                    </Button>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| remove(id, username.clone())
                                    >
                                        "Eliminar"
                                    </Button>
                                </TableCellLayout>
                            </TableCell>
                        </TableRow>
                    }
                }).collect_view()}
            </TableBody>
        </Table>

        <Show when=move || show_create_form.get()>
            <CreateUserForm
                on_close=move || set_show_create_form.set(false)
                on_created=move || {
                    set_show_create_form.set(false);
                    load_data();
                }
            />
        </Show>

        {move || managing.get().map(|user| view! {
            <UserPermissions user=user on_close=move || managing.set(None) />
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompted_password() {
        assert_eq!(prompted_password(None), None);
        assert_eq!(prompted_password(Some("   ".to_string())), None);
        assert_eq!(
            prompted_password(Some("nueva123".to_string())),
            Some("nueva123".to_string())
        );
    }
}
