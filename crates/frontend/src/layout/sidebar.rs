use crate::layout::global_context::{use_global_context, Page};
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_global_context();

    view! {
        <nav class="app-sidebar__content">
            {Page::ALL.into_iter().map(|page| {
                view! {
                    <div
                        class="app-sidebar__item"
                        class:app-sidebar__item--active=move || ctx.active.get() == page
                        on:click=move |_| ctx.open(page)
                    >
                        <span>{page.label()}</span>
                    </div>
                }
            }).collect_view()}
        </nav>
    }
}
