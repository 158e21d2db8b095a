use crate::domain::a001_store::api;
use crate::layout::global_context::use_global_context;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_toast;
use contracts::domain::a001_store::{Store, StoreDto, StoreId};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn StoreList() -> impl IntoView {
    let ctx = use_global_context();
    let toast = use_toast();

    let (items, set_items) = signal(Vec::<Store>::new());
    let (error, set_error) = signal(None::<String>);
    let new_name = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<StoreId>);
    let edit_name = RwSignal::new(String::new());

    let fetch = move || {
        spawn_local(async move {
            match api::fetch_stores().await {
                Ok(stores) => {
                    set_items.set(stores);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let create = move || {
        let dto = StoreDto::new(new_name.get_untracked().trim());
        if let Err(e) = dto.validate() {
            toast.warning(e);
            return;
        }
        spawn_local(async move {
            match api::create_store(&dto).await {
                Ok(()) => {
                    toast.success("Tienda creada");
                    new_name.set(String::new());
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let start_rename = move |store: &Store| {
        edit_name.set(store.name.clone());
        editing.set(Some(store.id));
    };

    let save_rename = move |id: StoreId| {
        let dto = StoreDto::new(edit_name.get_untracked().trim());
        if let Err(e) = dto.validate() {
            toast.warning(e);
            return;
        }
        spawn_local(async move {
            match api::update_store(id, &dto).await {
                Ok(()) => {
                    toast.success("Actualizado");
                    editing.set(None);
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let remove = move |store: Store| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("¿Eliminar la tienda \"{}\"?", store.name))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_store(store.id).await {
                Ok(()) => {
                    toast.success("Tienda eliminada");
                    if ctx.store.get_untracked() == Some(store.id) {
                        ctx.select_store(None);
                    }
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    fetch();

    view! {
        <PageFrame page_id=Store::list_page_id() category=PAGE_CAT_LIST>
            <div class="page__header">
                <h1 class="page__title">{Store::list_name()}</h1>
                <Flex gap=FlexGap::Small>
                    <Input value=new_name placeholder="Nombre de la tienda" />
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| create()>
                        "Agregar"
                    </Button>
                </Flex>
            </div>

            {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}

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
                        {move || items.get().into_iter().map(|store| {
                            let id = store.id;
                            let for_rename = store.clone();
                            let for_delete = store.clone();
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>{id.to_string()}</TableCellLayout></TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <Show
                                                when=move || editing.get() == Some(id)
                                                fallback=move || view! { <span>{for_rename.name.clone()}</span> }
                                            >
                                                <Input value=edit_name />
                                            </Show>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <Show
                                                when=move || editing.get() == Some(id)
                                                fallback={
                                                    let store = store.clone();
                                                    move || {
                                                        let store = store.clone();
                                                        view! {
                                                            <Button size=ButtonSize::Small on_click=move |_| start_rename(&store)>
                                                                "Editar"
                                                            </Button>
                                                        }
                                                    }
                                                }
                                            >
                                                <Button size=ButtonSize::Small appearance=ButtonAppearance::Primary on_click=move |_| save_rename(id)>
                                                    "Guardar"
                                                </Button>
                                                <Button size=ButtonSize::Small on_click=move |_| editing.set(None)>
                                                    "Cancelar"
                                                </Button>
                                            </Show>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click={
                                                    let store = for_delete.clone();
                                                    move |_| remove(store.clone())
                                                }
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
