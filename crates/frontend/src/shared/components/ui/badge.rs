use leptos::prelude::*;

/// Counter badge, e.g. number of tags mapped to an element
#[component]
pub fn Badge(
    /// "primary", "success", "warning", "error" or "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    #[prop(optional, into)] color: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };
    let style = move || {
        color
            .get()
            .filter(|c| !c.is_empty())
            .map(|c| format!("border-left: 4px solid {};", c))
            .unwrap_or_default()
    };

    view! {
        <span class=move || format!("badge {}", variant_class()) style=style>
            {children()}
        </span>
    }
}
