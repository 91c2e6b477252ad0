use contracts::domain::a001_widget::input::toggle_key;
use contracts::domain::a001_widget::items::OrganigramNode;
use contracts::domain::a001_widget::{Widget, WidgetProperties, WidgetValue};
use contracts::domain::common::list_item::sort_by_order;
use leptos::prelude::*;

fn node_view(
    node: OrganigramNode,
    value: Signal<Option<WidgetValue>, LocalStorage>,
    emit: Callback<Option<WidgetValue>>,
    disabled: Signal<bool>,
) -> AnyView {
    let selected = move || {
        value.with(|v| match v {
            Some(WidgetValue::Organigram(keys)) => keys.clone(),
            _ => Vec::new(),
        })
    };
    let key = node.key.clone();
    let checked = {
        let key = key.clone();
        move || selected().contains(&key)
    };
    let children = sort_by_order(&node.children)
        .into_iter()
        .map(|child| node_view(child, value, emit, disabled))
        .collect_view();

    view! {
        <li class="organigram-input__node">
            <label title=node.tooltip.clone().unwrap_or_default()>
                <input
                    type="checkbox"
                    prop:checked=checked
                    disabled=move || disabled.get()
                    on:change=move |_| {
                        let next = toggle_key(Some(selected().as_slice()), &key);
                        emit.run((!next.is_empty()).then_some(WidgetValue::Organigram(next)));
                    }
                />
                {node.label}
            </label>
            <ul class="organigram-input__children">{children}</ul>
        </li>
    }
    .into_any()
}

/// Organigram tree with one checkbox per node
#[component]
pub fn OrganigramInput(
    widget: Widget,
    value: Signal<Option<WidgetValue>, LocalStorage>,
    emit: Callback<Option<WidgetValue>>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let root = match widget.properties {
        WidgetProperties::Organigram(p) => p.options,
        _ => None,
    };

    view! {
        <ul class="organigram-input">
            {root.map(|root| node_view(root, value, emit, disabled))}
        </ul>
    }
}
