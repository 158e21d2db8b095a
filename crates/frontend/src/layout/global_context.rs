use contracts::domain::a001_store::{Store, StoreId};
use contracts::domain::a002_supplier::{Supplier, SupplierId};
use contracts::domain::a003_product::Product;
use contracts::domain::a004_purchase::Purchase;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Pages of the console: one per aggregate, plus user administration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Purchases,
    Stores,
    Suppliers,
    Products,
    Users,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Purchases,
        Page::Stores,
        Page::Suppliers,
        Page::Products,
        Page::Users,
    ];

    /// Aggregate full name (`sys_users` for users), also used in the
    /// `?active=` query parameter
    pub fn key(self) -> String {
        match self {
            Page::Purchases => Purchase::full_name(),
            Page::Stores => Store::full_name(),
            Page::Suppliers => Supplier::full_name(),
            Page::Products => Product::full_name(),
            Page::Users => "sys_users".to_string(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Purchases => Purchase::list_name(),
            Page::Stores => Store::list_name(),
            Page::Suppliers => Supplier::list_name(),
            Page::Products => Product::list_name(),
            Page::Users => "Usuarios",
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.key() == key)
    }
}

/// Navigation and the store/supplier selection shared by all pages
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Page>,
    pub left_open: RwSignal<bool>,
    pub store: RwSignal<Option<StoreId>>,
    pub supplier: RwSignal<Option<SupplierId>>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Page::default()),
            left_open: RwSignal::new(true),
            store: RwSignal::new(None),
            supplier: RwSignal::new(None),
        }
    }

    pub fn open(&self, page: Page) {
        log::debug!("open page {}", page.key());
        self.active.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }

    /// A new store invalidates the supplier picked for the previous one
    pub fn select_store(&self, store: Option<StoreId>) {
        if self.store.get_untracked() != store {
            self.store.set(store);
            self.supplier.set(None);
        }
    }

    pub fn select_supplier(&self, supplier: Option<SupplierId>) {
        if self.supplier.get_untracked() != supplier {
            self.supplier.set(supplier);
        }
    }

    /// Keep the active page in the `?active=` query parameter so a reload
    /// returns to it
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(page) = page_from_query(&search) {
            self.active.set(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let page = this.active.get();
            let query_string =
                serde_qs::to_string(&HashMap::from([("active".to_string(), page.key())]))
                    .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

fn page_from_query(search: &str) -> Option<Page> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").and_then(|key| Page::from_key(key))
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keys_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_key(&page.key()), Some(page));
        }
        assert_eq!(Page::Purchases.key(), "a004_purchase");
    }

    #[test]
    fn test_page_from_query() {
        assert_eq!(page_from_query("?active=a003_product"), Some(Page::Products));
        assert_eq!(page_from_query("?active=sys_users"), Some(Page::Users));
        assert_eq!(page_from_query("?active=unknown"), None);
        assert_eq!(page_from_query(""), None);
    }
}
