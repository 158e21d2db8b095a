//! PageFrame: standard root wrapper for every page.
//!
//! Sets `id` (`"{entity}--{category}"`) and `data-page-category` on the root
//! element.

use super::page_standard::*;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`, e.g. `"a001_store--list"`.
    page_id: String,
    /// One of the PAGE_CAT_* constants from `page_standard`.
    category: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(&page_id), "bad page id {page_id}");
    debug_assert!(is_known_category(category), "bad page category {category}");

    let class = match category {
        PAGE_CAT_MATRIX => "page page--matrix",
        PAGE_CAT_SYSTEM => "page page--system",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
