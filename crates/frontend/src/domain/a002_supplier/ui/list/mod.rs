use crate::domain::a001_store::ui::picker::StorePicker;
use crate::domain::a002_supplier::api;
use crate::layout::global_context::use_global_context;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_toast;
use contracts::domain::a002_supplier::{Supplier, SupplierCreateDto, SupplierId, SupplierUpdateDto};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn SupplierList() -> impl IntoView {
    let ctx = use_global_context();
    let toast = use_toast();

    let (items, set_items) = signal(Vec::<Supplier>::new());
    let new_name = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<SupplierId>);
    let edit_name = RwSignal::new(String::new());
    // Bumped after every change to refetch
    let revision = RwSignal::new(0u32);

    Effect::new(move |_| {
        revision.track();
        let Some(store_id) = ctx.store.get() else {
            set_items.set(Vec::new());
            return;
        };
        spawn_local(async move {
            match api::fetch_suppliers(store_id).await {
                Ok(list) => set_items.set(list),
                Err(e) => toast.error(e),
            }
        });
    });

    let refetch = move || revision.update(|r| *r += 1);

    let create = move || {
        let Some(store_id) = ctx.store.get_untracked() else {
            toast.warning("Seleccione una tienda");
            return;
        };
        let dto = SupplierCreateDto {
            name: new_name.get_untracked().trim().to_string(),
            store_id,
        };
        if let Err(e) = dto.validate() {
            toast.warning(e);
            return;
        }
        spawn_local(async move {
            match api::create_supplier(&dto).await {
                Ok(()) => {
                    toast.success("Proveedor creado");
                    new_name.set(String::new());
                    refetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let save_rename = move |id: SupplierId| {
        let name = edit_name.get_untracked().trim().to_string();
        if name.is_empty() {
            toast.warning("El nombre del proveedor es obligatorio");
            return;
        }
        let dto = SupplierUpdateDto { name };
        spawn_local(async move {
            match api::update_supplier(id, &dto).await {
                Ok(()) => {
                    toast.success("Actualizado");
                    editing.set(None);
                    refetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let remove = move |supplier: Supplier| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("¿Eliminar el proveedor \"{}\"?", supplier.name))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_supplier(supplier.id).await {
                Ok(()) => {
                    toast.success("Proveedor eliminado");
                    if ctx.supplier.get_untracked() == Some(supplier.id) {
                        ctx.select_supplier(None);
                    }
                    refetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    view! {
        <PageFrame page_id=Supplier::list_page_id() category=PAGE_CAT_LIST>
            <div class="page__header">
                <h1 class="page__title">{Supplier::list_name()}</h1>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <StorePicker />
                    <Input value=new_name placeholder="Nombre del proveedor" />
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || ctx.store.get().is_none())
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
                            <TableHeaderCell min_width=80.0>"ID"</TableHeaderCell>
                            <TableHeaderCell resizable=true min_width=240.0>"Nombre"</TableHeaderCell>
                            <TableHeaderCell min_width=200.0>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || items.get().into_iter().map(|supplier| {
                            let id = supplier.id;
                            let name = supplier.name.clone();
                            let name_cell = name.clone();
                            let name_actions = name.clone();
                            let for_delete = supplier.clone();
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>{id.to_string()}</TableCellLayout></TableCell>
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
                        }).collect_view()}
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}
