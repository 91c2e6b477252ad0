use crate::shared::components::ui::{Checkbox, Select};
use contracts::domain::a001_widget::input::toggle_key;
use contracts::domain::a001_widget::{Widget, WidgetProperties, WidgetValue};
use contracts::domain::common::list_item::sort_by_order;
use leptos::prelude::*;

/// Scale points as colored buttons; clicking the selected point clears it
#[component]
pub fn ScaleInput(
    widget: Widget,
    value: Signal<Option<WidgetValue>, LocalStorage>,
    emit: Callback<Option<WidgetValue>>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let options = match &widget.properties {
        WidgetProperties::Scale(p) => sort_by_order(&p.options),
        _ => Vec::new(),
    };
    let selected = move || {
        value.with(|v| match v {
            Some(WidgetValue::Scale(key)) => Some(key.clone()),
            _ => None,
        })
    };

    view! {
        <div class="scale-input">
            {options
                .into_iter()
                .map(|option| {
                    let key = option.key.clone();
                    let is_selected = {
                        let key = key.clone();
                        move || selected().as_deref() == Some(key.as_str())
                    };
                    let selected_class = is_selected.clone();
                    view! {
                        <button
                            class="scale-input__point"
                            class:scale-input__point--selected=selected_class
                            style=format!("--scale-color: {}", option.color)
                            title=option.tooltip.clone().unwrap_or_default()
                            disabled=move || disabled.get()
                            on:click=move |_| {
                                let next = if is_selected() {
                                    None
                                } else {
                                    Some(WidgetValue::Scale(key.clone()))
                                };
                                emit.run(next);
                            }
                        >
                            {option.label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn SelectInput(
    widget: Widget,
    value: Signal<Option<WidgetValue>, LocalStorage>,
    emit: Callback<Option<WidgetValue>>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let options = match &widget.properties {
        WidgetProperties::Select(p) => sort_by_order(&p.options)
            .into_iter()
            .map(|o| (o.key, o.label))
            .collect(),
        _ => Vec::new(),
    };

    view! {
        <Select
            placeholder="Select an option"
            options=Signal::stored(options)
            disabled=disabled
            value=Signal::derive(move || {
                value.with(|v| match v {
                    Some(WidgetValue::Select(key)) => key.clone(),
                    _ => String::new(),
                })
            })
            on_change=Callback::new(move |key: String| {
                emit.run(Some(key).filter(|k| !k.is_empty()).map(WidgetValue::Select))
            })
        />
    }
}

#[component]
pub fn MultiSelectInput(
    widget: Widget,
    value: Signal<Option<WidgetValue>, LocalStorage>,
    emit: Callback<Option<WidgetValue>>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let options = match &widget.properties {
        WidgetProperties::MultiSelect(p) => sort_by_order(&p.options),
        _ => Vec::new(),
    };
    let selected = move || {
        value.with(|v| match v {
            Some(WidgetValue::MultiSelect(keys)) => keys.clone(),
            _ => Vec::new(),
        })
    };

    view! {
        <div class="multiselect-input">
            {options
                .into_iter()
                .map(|option| {
                    let key = option.key.clone();
                    let checked = {
                        let key = key.clone();
                        Signal::derive(move || selected().contains(&key))
                    };
                    view! {
                        <Checkbox
                            label=option.label
                            title=option.tooltip.unwrap_or_default()
                            checked=checked
                            disabled=disabled
                            on_change=Callback::new(move |_| {
                                let next = toggle_key(Some(selected().as_slice()), &key);
                                emit.run((!next.is_empty()).then_some(WidgetValue::MultiSelect(next)));
                            })
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}
