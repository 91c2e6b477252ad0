use super::geo::GeoOptions;
use crate::shared::components::ui::Badge;
use crate::shared::date_utils::{format_date, format_range, format_time};
use contracts::domain::a001_widget::{display_value, DisplayValue, GeoAreaLookup, Widget, WidgetValue};
use contracts::enums::WidgetKind;
use leptos::prelude::*;

fn format_for(kind: WidgetKind, text: &str) -> String {
    match kind {
        WidgetKind::Date | WidgetKind::DateRange => format_date(text),
        WidgetKind::Time | WidgetKind::TimeRange => format_time(text),
        _ => text.to_string(),
    }
}

/// Read-only rendering of a widget value
#[component]
pub fn ReadOnlyValue(
    widget: Widget,
    value: Signal<Option<WidgetValue>, LocalStorage>,
    geo: Option<GeoOptions>,
) -> impl IntoView {
    let kind = widget.kind();
    let resolved = move || {
        let lookup = geo.map(|g| g.lookup.get()).unwrap_or_else(GeoAreaLookup::new);
        value.with(|v| display_value(&widget, v.as_ref(), &lookup))
    };

    move || match resolved() {
        DisplayValue::Empty => view! { <span class="widget-value widget-value--empty">"-"</span> }.into_any(),
        DisplayValue::Text(text) => {
            view! { <span class="widget-value">{format_for(kind, &text)}</span> }.into_any()
        }
        DisplayValue::Range { start, end } => view! {
            <span class="widget-value">
                {format_range(&format_for(kind, &start), &format_for(kind, &end))}
            </span>
        }
        .into_any(),
        DisplayValue::Scale { label, color } => view! { <Badge color=color>{label}</Badge> }.into_any(),
        DisplayValue::Labels(labels) => view! {
            <ul class="widget-value widget-value--list">
                {labels.into_iter().map(|l| view! { <li>{l}</li> }).collect_view()}
            </ul>
        }
        .into_any(),
        DisplayValue::Groups(groups) => view! {
            <div class="widget-value widget-value--groups">
                {groups
                    .into_iter()
                    .map(|group| {
                        view! {
                            <div class="widget-value__group" style=group.color.map(|c| format!("--group-color: {}", c))>
                                <span class="widget-value__group-label">{group.label}</span>
                                <span class="widget-value__group-items">{group.items.join(", ")}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
    }
}
