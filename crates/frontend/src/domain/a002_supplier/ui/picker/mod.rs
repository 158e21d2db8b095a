//! Supplier selector for the store chosen in `StorePicker`.

use crate::domain::a001_store::ui::picker::parse_id;
use crate::domain::a002_supplier::api;
use crate::layout::global_context::use_global_context;
use crate::shared::toast::use_toast;
use contracts::domain::a002_supplier::{Supplier, SupplierId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn SupplierPicker() -> impl IntoView {
    let ctx = use_global_context();
    let toast = use_toast();

    let (suppliers, set_suppliers) = signal(Vec::<Supplier>::new());
    let selected = RwSignal::new(
        ctx.supplier
            .get_untracked()
            .map(|id| id.to_string())
            .unwrap_or_default(),
    );

    // Reload whenever the store changes
    Effect::new(move |_| {
        let Some(store_id) = ctx.store.get() else {
            set_suppliers.set(Vec::new());
            return;
        };
        spawn_local(async move {
            match api::fetch_suppliers(store_id).await {
                Ok(list) => {
                    // A late answer for a store no longer selected is dropped
                    if ctx.store.get_untracked() != Some(store_id) {
                        return;
                    }
                    let current = ctx.supplier.get_untracked();
                    if !list.iter().any(|s| Some(s.id) == current) {
                        ctx.select_supplier(list.first().map(|s| s.id));
                    }
                    set_suppliers.set(list);
                }
                Err(e) => toast.error(e),
            }
        });
    });

    Effect::new(move |_| {
        let id = parse_id(&selected.get()).map(SupplierId::new);
        ctx.select_supplier(id);
    });

    Effect::new(move |_| {
        let value = ctx
            .supplier
            .get()
            .map(|id| id.to_string())
            .unwrap_or_default();
        if selected.get_untracked() != value {
            selected.set(value);
        }
    });

    view! {
        <Flex gap=FlexGap::Small align=FlexAlign::Center>
            <Label>"Proveedor"</Label>
            <Select value=selected>
                <option value="">"-- Seleccione --"</option>
                <For
                    each=move || suppliers.get()
                    key=|supplier| supplier.id
                    children=move |supplier: Supplier| {
                        view! { <option value=supplier.id.to_string()>{supplier.name}</option> }
                    }
                />
            </Select>
        </Flex>
    }
}
