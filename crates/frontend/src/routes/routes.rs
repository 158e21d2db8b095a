use crate::domain::a001_store::ui::list::StoreList;
use crate::domain::a002_supplier::ui::list::SupplierList;
use crate::domain::a003_product::ui::list::ProductList;
use crate::domain::a004_purchase::ui::inventory::PurchaseInventory;
use crate::layout::global_context::{use_global_context, Page};
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use crate::system::users::ui::list::UsersPage;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_global_context();

    // Runs once when the layout is created.
    ctx.init_router_integration();

    view! {
        <Shell center=move || {
            match ctx.active.get() {
                Page::Purchases => view! { <PurchaseInventory /> }.into_any(),
                Page::Stores => view! { <StoreList /> }.into_any(),
                Page::Suppliers => view! { <SupplierList /> }.into_any(),
                Page::Products => view! { <ProductList /> }.into_any(),
                Page::Users => view! { <UsersPage /> }.into_any(),
            }
        } />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
