//! Store selector shared by the supplier, product and purchase pages.
//!
//! Bound to `AppGlobalContext::store`; picks the first store when nothing is
//! selected yet.

use crate::domain::a001_store::api;
use crate::layout::global_context::use_global_context;
use crate::shared::toast::use_toast;
use contracts::domain::a001_store::{Store, StoreId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub(crate) fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

#[component]
pub fn StorePicker() -> impl IntoView {
    let ctx = use_global_context();
    let toast = use_toast();

    let (stores, set_stores) = signal(Vec::<Store>::new());
    let selected = RwSignal::new(
        ctx.store
            .get_untracked()
            .map(|id| id.to_string())
            .unwrap_or_default(),
    );

    spawn_local(async move {
        match api::fetch_stores().await {
            Ok(list) => {
                let current = ctx.store.get_untracked();
                if !list.iter().any(|s| Some(s.id) == current) {
                    ctx.select_store(list.first().map(|s| s.id));
                }
                set_stores.set(list);
            }
            Err(e) => toast.error(e),
        }
    });

    Effect::new(move |_| {
        let id = parse_id(&selected.get()).map(StoreId::new);
        ctx.select_store(id);
    });

    Effect::new(move |_| {
        let value = ctx.store.get().map(|id| id.to_string()).unwrap_or_default();
        if selected.get_untracked() != value {
            selected.set(value);
        }
    });

    view! {
        <Flex gap=FlexGap::Small align=FlexAlign::Center>
            <Label>"Tienda"</Label>
            <Select value=selected>
                <option value="">"-- Seleccione --"</option>
                <For
                    each=move || stores.get()
                    key=|store| store.id
                    children=move |store: Store| {
                        view! { <option value=store.id.to_string()>{store.name}</option> }
                    }
                />
            </Select>
        </Flex>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("abc"), None);
    }
}
