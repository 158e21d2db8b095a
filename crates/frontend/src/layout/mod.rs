pub mod global_context;
pub mod sidebar;
pub mod top_header;

use global_context::use_global_context;
use leptos::prelude::*;
use sidebar::Sidebar;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------+
/// |          TopHeader           |
/// +------------------------------+
/// |  Sidebar  |     Content      |
/// +------------------------------+
/// ```
#[component]
pub fn Shell<C>(center: C) -> impl IntoView
where
    C: Fn() -> AnyView + 'static + Send,
{
    let ctx = use_global_context();

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <Show when=move || ctx.left_open.get()>
                    <aside class="app-sidebar">
                        <Sidebar />
                    </aside>
                </Show>
                <main class="app-main">
                    {move || center()}
                </main>
            </div>
        </div>
    }
}
