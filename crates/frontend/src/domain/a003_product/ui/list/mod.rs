use crate::domain::a001_store::ui::picker::StorePicker;
use crate::domain::a002_supplier::ui::picker::SupplierPicker;
use crate::domain::a003_product::api;
use crate::layout::global_context::use_global_context;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_toast;
use contracts::domain::a003_product::{
    MoveDirection, Product, ProductCreateDto, ProductId, ProductUpdateDto,
};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ProductList() -> impl IntoView {
    let ctx = use_global_context();
    let toast = use_toast();

    let (items, set_items) = signal(Vec::<Product>::new());
    let new_name = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<ProductId>);
    let edit_name = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let revision = RwSignal::new(0u32);

    Effect::new(move |_| {
        revision.track();
        let Some(supplier_id) = ctx.supplier.get() else {
            set_items.set(Vec::new());
            return;
        };
        spawn_local(async move {
            match api::fetch_products(supplier_id).await {
                Ok(list) => set_items.set(list),
                Err(e) => toast.error(e),
            }
        });
    });

    let refetch = move || revision.update(|r| *r += 1);

    let create = move || {
        let Some(supplier_id) = ctx.supplier.get_untracked() else {
            toast.warning("Seleccione un proveedor");
            return;
        };
        let dto = ProductCreateDto {
            name: new_name.get_untracked().trim().to_string(),
            supplier_id,
        };
        if let Err(e) = dto.validate() {
            toast.warning(e);
            return;
        }
        spawn_local(async move {
            match api::create_product(&dto).await {
                Ok(()) => {
                    toast.success("Producto creado");
                    new_name.set(String::new());
                    refetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let save_rename = move |id: ProductId| {
        let name = edit_name.get_untracked().trim().to_string();
        if name.is_empty() {
            toast.warning("El nombre del producto es obligatorio");
            return;
        }
        let dto = ProductUpdateDto { name };
        spawn_local(async move {
            match api::update_product(id, &dto).await {
                Ok(()) => {
                    toast.success("Actualizado");
                    editing.set(None);
                    refetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let reorder = move |id: ProductId, direction: MoveDirection| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        spawn_local(async move {
            if let Err(e) = api::move_product(id, direction).await {
                toast.error(e);
            }
            busy.set(false);
            refetch();
        });
    };

    let remove = move |product: Product| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("¿Eliminar el producto \"{}\"?", product.name))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_product(product.id).await {
                Ok(()) => {
                    toast.success("Producto eliminado");
                    refetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    view! {
        <PageFrame page_id=Product::list_page_id() category=PAGE_CAT_LIST>
            <div class="page__header">
                <h1 class="page__title">{Product::list_name()}</h1>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <StorePicker />
                    <SupplierPicker />
                </Flex>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Input value=new_name placeholder="Nombre del producto" />
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || ctx.supplier.get().is_none())
                        on_click=move |_| create()
                    >
                        "Agregar"
                    </Button>
                </Flex>
            </div>

            <div class="page__content">
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=90.0>"Orden"</TableHeaderCell>
                            <TableHeaderCell resizable=true min_width=240.0>"Nombre"</TableHeaderCell>
                            <TableHeaderCell min_width=200.0>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let products = items.get();
                            let last = products.len().saturating_sub(1);
                            products.into_iter().enumerate().map(|(index, product)| {
                                let id = product.id;
                                let name = product.name.clone();
                                let name_cell = name.clone();
                                let name_actions = name.clone();
                                let for_delete = product.clone();
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Transparent
                                                    disabled=Signal::derive(move || index == 0 || busy.get())
                                                    on_click=move |_| reorder(id, MoveDirection::Up)
                                                >
                                                    "▲"
                                                </Button>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Transparent
                                                    disabled=Signal::derive(move || index == last || busy.get())
                                                    on_click=move |_| reorder(id, MoveDirection::Down)
                                                >
                                                    "▼"
                                                </Button>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {
                                                    let name = name_cell.clone();
                                                    move || if editing.get() == Some(id) {
                                                        view! { <Input value=edit_name /> }.into_any()
                                                    } else {
                                                        view! { <span>{name.clone()}</span> }.into_any()
                                                    }
                                                }
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {
                                                    let name = name_actions.clone();
                                                    move || if editing.get() == Some(id) {
                                                        view! {
                                                            <Button size=ButtonSize::Small appearance=ButtonAppearance::Primary on_click=move |_| save_rename(id)>
                                                                "Guardar"
                                                            </Button>
                                                            <Button size=ButtonSize::Small on_click=move |_| editing.set(None)>
                                                                "Cancelar"
                                                            </Button>
                                                        }.into_any()
                                                    } else {
                                                        let name = name.clone();
                                                        view! {
                                                            <Button size=ButtonSize::Small on_click=move |_| {
                                                                edit_name.set(name.clone());
                                                                editing.set(Some(id));
                                                            }>
                                                                "Editar"
                                                            </Button>
                                                        }.into_any()
                                                    }
                                                }
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| remove(for_delete.clone())
                                                >
                                                    "Eliminar"
                                                </Button>
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view()
                        }}
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}
