use leptos::prelude::*;

use super::context::use_auth;

/// Renders its children for superusers only
#[component]
pub fn RequireSuperuser(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_superuser()
            fallback=|| view! { <div class="warning-box">"Acceso denegado. Se requiere superusuario."</div> }
        >
            {children()}
        </Show>
    }
}
