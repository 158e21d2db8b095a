//! Purchases page: the inventory matrix of the selected supplier.
//!
//! Rows are products, columns the most recent purchases (oldest left).
//! Users allowed to see inventory get a previous-inventory block left of the
//! product names; quantities and restock suggestions sit on the right.

mod cell;
mod line_items;
pub mod state;

use contracts::domain::a004_purchase::{Purchase, PurchaseId};
use contracts::domain::common::AggregateRoot;
use contracts::shared::purchase_matrix::{EditField, MatrixColumn, ProductKey};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_store::ui::picker::StorePicker;
use crate::domain::a002_supplier::ui::picker::SupplierPicker;
use crate::domain::a004_purchase::api;
use crate::layout::global_context::use_global_context;
use crate::shared::components::ui::{Badge, BadgeVariant};
use crate::shared::date_utils::format_date;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_MATRIX;
use crate::shared::toast::use_toast;
use crate::system::auth::context::use_auth;
use cell::EditableCell;
use line_items::{LineItemPanel, NewPurchaseForm};
use state::{create_state, InventoryState};

/// Table structure without the figures; cells read those on their own so
/// an edit does not re-render the table
#[derive(Debug, Clone, PartialEq, Default)]
struct MatrixLayout {
    columns: Vec<MatrixColumn>,
    rows: Vec<(ProductKey, String)>,
}

#[component]
#[allow(non_snake_case)]
pub fn PurchaseInventory() -> impl IntoView {
    let ctx = use_global_context();
    let toast = use_toast();
    let (auth_state, _) = use_auth();
    let state = create_state();

    let can_view_inventory = Memo::new(move |_| auth_state.get().can_view_inventory());

    // Fetch whenever supplier, filters or the revision change
    Effect::new(move |_| {
        state.revision.track();
        let supplier = ctx.supplier.get();
        let query = state.range_query();

        if supplier.is_none() {
            state.clear_selection();
            return;
        }

        let request = state.next_request();
        state.loading.set(true);
        spawn_local(async move {
            let result = api::fetch_purchases(supplier, &query).await;
            // A newer request owns the matrix now
            if !state.is_current(request) {
                return;
            }
            state.loading.set(false);
            match result {
                Ok(purchases) => {
                    log::debug!("loaded {} purchases", purchases.len());
                    state.clear_suppression();
                    state.controller.update(|controller| {
                        if controller.column_limit() != query.limit {
                            controller.set_column_limit(query.limit);
                        }
                        controller.load(purchases);
                    });
                }
                Err(e) => toast.error(e),
            }
        });
    });

    // Local cache patches rebuild the matrix unless an edit already shows them
    Effect::new(move |previous: Option<u32>| {
        let version = state.cache_version.get();
        if previous.is_some() {
            state.rebuild_from_cache();
        }
        version
    });

    let layout = Memo::new(move |_| {
        state.controller.with(|controller| {
            let matrix = controller.matrix();
            MatrixLayout {
                columns: matrix.columns.clone(),
                rows: matrix
                    .rows
                    .iter()
                    .map(|row| (row.key.clone(), row.label.clone()))
                    .collect(),
            }
        })
    });

    let delete_purchase = move |purchase_id: PurchaseId, date: String| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!(
                    "¿Eliminar la compra del {}? Se eliminarán también sus detalles.",
                    format_date(&date)
                ))
                .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_purchase(purchase_id).await {
                Ok(()) => {
                    toast.success("Compra eliminada");
                    state.refetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    view! {
        <PageFrame page_id=format!("{}--matrix", Purchase::full_name()) category=PAGE_CAT_MATRIX>
            <div class="page__header">
                <h1 class="page__title">{Purchase::list_name()}</h1>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <StorePicker />
                    <SupplierPicker />
                    <Label>"Desde"</Label>
                    <input
                        type="date"
                        class="date-input"
                        prop:value=move || state.date_from.get()
                        on:change=move |ev| state.date_from.set(event_target_value(&ev))
                    />
                    <Label>"Hasta"</Label>
                    <input
                        type="date"
                        class="date-input"
                        prop:value=move || state.date_to.get()
                        on:change=move |ev| state.date_to.set(event_target_value(&ev))
                    />
                    <Label>"Compras"</Label>
                    <Input value=state.limit input_type=InputType::Number attr:style="width: 80px;" />
                    <Button on_click=move |_| state.refetch()>"Filtrar"</Button>
                </Flex>
                <NewPurchaseForm state=state />
            </div>

            <div class="page__content">
                <Show when=move || state.loading.get()>
                    <div class="page__loading">"Cargando..."</div>
                </Show>
                <Show
                    when=move || !layout.get().columns.is_empty()
                    fallback=move || view! {
                        <div class="page__empty">
                            {move || if ctx.supplier.get().is_none() {
                                "Seleccione un proveedor"
                            } else {
                                "No hay compras en el rango seleccionado"
                            }}
                        </div>
                    }
                >
                    {move || render_table(state, layout.get(), can_view_inventory.get(), delete_purchase)}
                </Show>
                <LineItemPanel state=state />
            </div>
        </PageFrame>
    }
}

fn render_table(
    state: InventoryState,
    layout: MatrixLayout,
    can_view_inventory: bool,
    delete_purchase: impl Fn(PurchaseId, String) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let column_count = layout.columns.len();

    let inventory_headers = can_view_inventory.then(|| {
        layout
            .columns
            .iter()
            .map(|column| {
                view! {
                    <TableHeaderCell resizable=false min_width=110.0>
                        {format!("Inv. {}", column.header())}
                    </TableHeaderCell>
                }
            })
            .collect_view()
    });

    let purchase_headers = layout
        .columns
        .iter()
        .map(|column| {
            let purchase_id = column.purchase_id;
            let date = column.purchase_date.clone();
            let header = column.header();
            view! {
                <TableHeaderCell resizable=false min_width=110.0>
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <span>{header}</span>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| delete_purchase(purchase_id, date.clone())
                        >
                            "×"
                        </Button>
                    </Flex>
                </TableHeaderCell>
            }
        })
        .collect_view();

    let rows = layout
        .rows
        .into_iter()
        .map(|(key, label)| {
            let inv_key = key.clone();
            let inventory_cells = can_view_inventory.then(|| {
                (0..column_count)
                    .map(|column| {
                        let key = inv_key.clone();
                        view! {
                            <TableCell>
                                <EditableCell
                                    state=state
                                    row_key=key.clone()
                                    column=column
                                    field=EditField::PreviousInventory
                                />
                            </TableCell>
                        }
                    })
                    .collect_view()
            });

            let quantity_cells = (0..column_count)
                .map(|column| {
                    let suggestion_key = key.clone();
                    let cell_key = key.clone();
                    let suggestion = move || {
                        state.controller.with(|controller| {
                            controller
                                .matrix()
                                .row(&suggestion_key)
                                .and_then(|row| row.suggestion(column))
                        })
                    };
                    view! {
                        <TableCell>
                            <EditableCell
                                state=state
                                row_key=cell_key
                                column=column
                                field=EditField::Quantity
                            />
                            {move || suggestion().map(|value| view! {
                                <Badge variant=BadgeVariant::Success title="Sugerido según el inventario">
                                    {format!("Sug. {}", value)}
                                </Badge>
                            })}
                        </TableCell>
                    }
                })
                .collect_view();

            view! {
                <TableRow>
                    {inventory_cells}
                    <TableCell>
                        <TableCellLayout>{label}</TableCellLayout>
                    </TableCell>
                    {quantity_cells}
                </TableRow>
            }
        })
        .collect_view();

    view! {
        <Table attr:id="compras-table">
            <TableHeader>
                <TableRow>
                    {inventory_headers}
                    <TableHeaderCell resizable=false min_width=200.0>"Producto"</TableHeaderCell>
                    {purchase_headers}
                </TableRow>
            </TableHeader>
            <TableBody>{rows}</TableBody>
        </Table>
    }
}
