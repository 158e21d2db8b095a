//! Purchase and line-item management around the matrix: new purchase,
//! add a line item, delete a line item. Every change ends in a refetch.

use contracts::domain::a003_product::{Product, ProductId};
use contracts::domain::a004_purchase::{
    LineItemCreateDto, LineItemId, PurchaseCreateDto, PurchaseId,
};
use contracts::shared::numeric::parse_cell_input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::state::InventoryState;
use crate::domain::a001_store::ui::picker::parse_id;
use crate::domain::a003_product::api as product_api;
use crate::domain::a004_purchase::api;
use crate::layout::global_context::use_global_context;
use crate::shared::date_utils::{format_date, today_iso};
use crate::shared::toast::use_toast;

/// Options of the purchase selects, newest first
fn purchase_options(state: InventoryState) -> Vec<(PurchaseId, String)> {
    state.controller.with(|controller| {
        controller
            .purchases()
            .iter()
            .rev()
            .map(|p| (p.id, format!("{} (#{})", format_date(p.date()), p.id)))
            .collect()
    })
}

#[component]
pub fn NewPurchaseForm(state: InventoryState) -> impl IntoView {
    let ctx = use_global_context();
    let toast = use_toast();
    let purchase_date = RwSignal::new(today_iso());

    let create = move || {
        let Some(supplier_id) = ctx.supplier.get_untracked() else {
            toast.warning("Seleccione un proveedor");
            return;
        };
        let dto = PurchaseCreateDto {
            supplier_id,
            purchase_date: purchase_date.get_untracked().trim().to_string(),
        };
        if let Err(e) = dto.validate() {
            toast.warning(e);
            return;
        }
        spawn_local(async move {
            match api::create_purchase(&dto).await {
                Ok(()) => {
                    toast.success("Compra creada");
                    state.refetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    view! {
        <Flex gap=FlexGap::Small align=FlexAlign::Center>
            <Label>"Nueva compra"</Label>
            <input
                type="date"
                class="date-input"
                prop:value=move || purchase_date.get()
                on:input=move |ev| purchase_date.set(event_target_value(&ev))
            />
            <Button
                appearance=ButtonAppearance::Primary
                disabled=Signal::derive(move || ctx.supplier.get().is_none())
                on_click=move |_| create()
            >
                "Crear compra"
            </Button>
        </Flex>
    }
}

#[component]
pub fn LineItemPanel(state: InventoryState) -> impl IntoView {
    let ctx = use_global_context();
    let toast = use_toast();

    let (products, set_products) = signal(Vec::<Product>::new());
    let add_purchase = RwSignal::new(String::new());
    let add_product = RwSignal::new(String::new());
    let add_quantity = RwSignal::new("0".to_string());
    let add_previous = RwSignal::new("0".to_string());
    let delete_purchase = RwSignal::new(String::new());
    let delete_item = RwSignal::new(String::new());

    let products_seq = StoredValue::new(0u64);

    Effect::new(move |_| {
        products_seq.update_value(|seq| *seq += 1);
        let request = products_seq.get_value();
        let Some(supplier_id) = ctx.supplier.get() else {
            set_products.set(Vec::new());
            return;
        };
        spawn_local(async move {
            let result = product_api::fetch_products(supplier_id).await;
            // Supplier changed while loading
            if products_seq.get_value() != request {
                return;
            }
            match result {
                Ok(list) => set_products.set(list),
                Err(e) => toast.error(e),
            }
        });
    });

    let add = move || {
        let purchase = parse_id(&add_purchase.get_untracked()).map(PurchaseId::new);
        let product = parse_id(&add_product.get_untracked()).map(ProductId::new);
        let (Some(purchase_id), Some(product_id)) = (purchase, product) else {
            toast.warning("Seleccione compra y producto");
            return;
        };
        let dto = LineItemCreateDto {
            product_id,
            quantity: parse_cell_input(&add_quantity.get_untracked()),
            previous_inventory: parse_cell_input(&add_previous.get_untracked()),
        };
        if let Err(e) = dto.validate() {
            toast.warning(e);
            return;
        }
        spawn_local(async move {
            match api::create_line_item(purchase_id, &dto).await {
                Ok(()) => {
                    toast.success("Detalle creado");
                    add_product.set(String::new());
                    add_quantity.set("0".to_string());
                    add_previous.set("0".to_string());
                    state.refetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    // Line items of the purchase picked for deletion
    let deletable_items = Memo::new(move |_| {
        let Some(purchase_id) = parse_id(&delete_purchase.get()).map(PurchaseId::new) else {
            return Vec::new();
        };
        state.controller.with(|controller| {
            controller
                .purchases()
                .iter()
                .find(|p| p.id == purchase_id)
                .map(|p| {
                    p.line_items
                        .iter()
                        .map(|item| (item.id, item.product_label()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    });

    let remove = move || {
        let Some(item_id) = parse_id(&delete_item.get_untracked()).map(LineItemId::new) else {
            toast.warning("Seleccione un detalle");
            return;
        };
        spawn_local(async move {
            match api::delete_line_item(item_id).await {
                Ok(()) => {
                    toast.success("Detalle eliminado");
                    delete_item.set(String::new());
                    state.refetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    view! {
        <div class="line-item-panel">
            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                <Label>"Agregar detalle"</Label>
                <Select value=add_purchase>
                    <option value="">"-- Compra --"</option>
                    {move || purchase_options(state).into_iter().map(|(id, label)| {
                        view! { <option value=id.to_string()>{label}</option> }
                    }).collect_view()}
                </Select>
                <Select value=add_product>
                    <option value="">"-- Producto --"</option>
                    <For
                        each=move || products.get()
                        key=|product| product.id
                        children=move |product: Product| {
                            view! { <option value=product.id.to_string()>{product.name}</option> }
                        }
                    />
                </Select>
                <Input value=add_quantity input_type=InputType::Number placeholder="Cantidad" />
                <Input value=add_previous input_type=InputType::Number placeholder="Inventario anterior" />
                <Button on_click=move |_| add()>"Agregar"</Button>
            </Flex>

            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                <Label>"Eliminar detalle"</Label>
                <Select value=delete_purchase>
                    <option value="">"-- Compra --"</option>
                    {move || purchase_options(state).into_iter().map(|(id, label)| {
                        view! { <option value=id.to_string()>{label}</option> }
                    }).collect_view()}
                </Select>
                <Select value=delete_item>
                    <option value="">"-- Detalle --"</option>
                    {move || deletable_items.get().into_iter().map(|(id, label)| {
                        view! { <option value=id.to_string()>{label}</option> }
                    }).collect_view()}
                </Select>
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=Signal::derive(move || delete_item.get().is_empty())
                    on_click=move |_| remove()
                >
                    "Eliminar"
                </Button>
            </Flex>
        </div>
    }
}
