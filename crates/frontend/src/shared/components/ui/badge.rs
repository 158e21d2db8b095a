use leptos::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    #[default]
    Neutral,
    Success,
    Warning,
}

/// Small inline label, e.g. the restock suggestion under a quantity
#[component]
pub fn Badge(
    #[prop(optional)] variant: BadgeVariant,
    /// Tooltip
    #[prop(optional, into)]
    title: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let variant_class = match variant {
        BadgeVariant::Neutral => "badge--neutral",
        BadgeVariant::Success => "badge--success",
        BadgeVariant::Warning => "badge--warning",
    };

    view! {
        <span class=format!("badge {}", variant_class) title=move || title.get()>
            {children()}
        </span>
    }
}
