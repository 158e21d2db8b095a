//! Per-store permissions of one user.

use contracts::domain::a001_store::{Store, StoreId};
use contracts::domain::common::AggregateId;
use contracts::system::auth::{Permission, PermissionFlag, PermissionFlags};
use contracts::system::users::{PermissionCreateDto, User};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_store::api as store_api;
use crate::shared::toast::use_toast;
use crate::system::users::api;

/// Store column text: the store name, `Tienda {id}` for an unknown store,
/// `Global` for a permission without store
pub fn store_label(stores: &[Store], store: Option<StoreId>) -> String {
    match store {
        None => "Global".to_string(),
        Some(id) => stores
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("Tienda {}", id)),
    }
}

#[component]
pub fn UserPermissions<F>(user: User, on_close: F) -> impl IntoView
where
    F: Fn() + 'static + Copy + Send + Sync,
{
    let toast = use_toast();
    let user_id = user.id;

    let (permissions, set_permissions) = signal(Vec::<Permission>::new());
    let (stores, set_stores) = signal(Vec::<Store>::new());
    let (loading, set_loading) = signal(false);
    let new_store = RwSignal::new(String::new());
    let new_flags = RwSignal::new(PermissionFlags::all());
    let (creating, set_creating) = signal(false);

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_permissions(user_id).await {
                Ok(list) => set_permissions.set(list),
                Err(e) => toast.error(e),
            }
            set_loading.set(false);
        });
    };

    spawn_local(async move {
        match store_api::fetch_stores().await {
            Ok(list) => set_stores.set(list),
            Err(e) => {
                log::warn!("stores for permissions: {}", e);
                toast.error("No se pudieron cargar las tiendas");
            }
        }
    });
    load();

    let toggle = move |permission: Permission, flag: PermissionFlag| {
        let Some(id) = permission.id else {
            toast.warning("Permiso sin identificador");
            return;
        };
        let next = permission.toggled(flag);
        spawn_local(async move {
            match api::update_permission(id, &next).await {
                Ok(()) => {
                    toast.success("Permiso actualizado");
                    set_permissions.update(|list| {
                        if let Some(p) = list.iter_mut().find(|p| p.id == Some(id)) {
                            *p = next;
                        }
                    });
                    load();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let remove = move |permission: Permission| {
        let Some(id) = permission.id else {
            return;
        };
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("¿Eliminar permiso?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_permission(id).await {
                Ok(()) => {
                    toast.success("Permiso eliminado");
                    set_permissions.update(|list| list.retain(|p| p.id != Some(id)));
                    load();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let create = move || {
        let Ok(store_id) = StoreId::from_string(&new_store.get_untracked()) else {
            toast.warning("Seleccione una tienda");
            return;
        };
        let dto = PermissionCreateDto {
            user_id,
            store_id,
            flags: new_flags.get_untracked(),
        };
        set_creating.set(true);
        spawn_local(async move {
            match api::create_permission(&dto).await {
                Ok(()) => {
                    toast.success("Permiso creado");
                    new_store.set(String::new());
                    load();
                }
                Err(e) => toast.error(e),
            }
            set_creating.set(false);
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal-content modal-content--wide" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>{format!("Permisos de {}", user.username)}</h3>
                    <button class="btn-close" on:click=move |_| on_close()>"×"</button>
                </div>

                <Show when=move || loading.get()>
                    <div>"Cargando permisos..."</div>
                </Show>
                <Show when=move || !loading.get() && permissions.get().is_empty()>
                    <div>"No hay permisos asignados."</div>
                </Show>

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=160.0>"Tienda"</TableHeaderCell>
                            {PermissionFlag::ALL.into_iter().map(|flag| view! {
                                <TableHeaderCell min_width=110.0>{flag.label()}</TableHeaderCell>
                            }).collect_view()}
                            <TableHeaderCell min_width=90.0>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || permissions.get().into_iter().map(|permission| {
                            let label = stores.with(|list| store_label(list, permission.store));
                            let for_delete = permission.clone();
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>{label}</TableCellLayout></TableCell>
                                    {PermissionFlag::ALL.into_iter().map(|flag| {
                                        let granted = permission.flags.get(flag);
                                        let appearance = if granted {
                                            ButtonAppearance::Primary
                                        } else {
                                            ButtonAppearance::Subtle
                                        };
                                        let permission = permission.clone();
                                        view! {
                                            <TableCell>
                                                <TableCellLayout>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=appearance
                                                        on_click=move |_| toggle(permission.clone(), flag)
                                                    >
                                                        {if granted { "✓" } else { "✗" }}
                                                    </Button>
                                                </TableCellLayout>
                                            </TableCell>
                                        }
                                    }).collect_view()}
                                    <TableCell>
                                        <TableCellLayout>
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

                <h4>"Nuevo permiso"</h4>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Select value=new_store>
                        <option value="">"Seleccione una tienda"</option>
                        {move || stores.get().into_iter().map(|store| view! {
                            <option value=store.id.to_string()>{store.name}</option>
                        }).collect_view()}
                    </Select>
                    {PermissionFlag::ALL.into_iter().map(|flag| view! {
                        <label>
                            <input
                                type="checkbox"
                                checked=move || new_flags.get().get(flag)
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    new_flags.update(|flags| flags.set(flag, checked));
                                }
                            />
                            {format!(" {}", flag.label())}
                        </label>
                    }).collect_view()}
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| create()
                        disabled=Signal::derive(move || creating.get())
                    >
                        "Crear permiso"
                    </Button>
                </Flex>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_label() {
        let stores = vec![Store {
            id: StoreId(1),
            name: "Centro".to_string(),
        }];
        assert_eq!(store_label(&stores, Some(StoreId(1))), "Centro");
        assert_eq!(store_label(&stores, Some(StoreId(9))), "Tienda 9");
        assert_eq!(store_label(&stores, None), "Global");
    }
}
