//! Top bar: sidebar toggle, title, signed-in user and logout.

use crate::layout::global_context::use_global_context;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let (auth_state, set_auth_state) = use_auth();

    let logout = move |_| {
        spawn_local(async move {
            do_logout(set_auth_state).await;
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    "☰"
                </button>
                <span class="top-header__title">"Inventario de Compras"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    <span>
                        {move || auth_state.get().user
                            .map(|u| u.username)
                            .unwrap_or_else(|| "Invitado".to_string())}
                    </span>
                </div>
                <button class="top-header__icon-btn" on:click=logout title="Cerrar sesión">
                    "Salir"
                </button>
            </div>
        </div>
    }
}
