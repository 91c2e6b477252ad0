use crate::shared::components::ui::{FieldError, Input};
use contracts::domain::a001_widget::input::{number_value, text_value};
use contracts::domain::a001_widget::properties::NumberProperties;
use contracts::domain::a001_widget::validation::validate_value;
use contracts::domain::a001_widget::value::{DateRangeValue, TimeRangeValue};
use contracts::domain::a001_widget::{Widget, WidgetProperties, WidgetValue};
use contracts::enums::WidgetKind;
use leptos::prelude::*;

/// TEXT, DATE and TIME
#[component]
pub fn SingleTextInput(
    kind: WidgetKind,
    value: Signal<Option<WidgetValue>, LocalStorage>,
    emit: Callback<Option<WidgetValue>>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let input_type = match kind {
        WidgetKind::Date => "date",
        WidgetKind::Time => "time",
        _ => "text",
    };
    let text = Signal::derive(move || {
        value.with(|v| match v {
            Some(WidgetValue::Text(s) | WidgetValue::Date(s) | WidgetValue::Time(s)) => s.clone(),
            _ => String::new(),
        })
    });

    view! {
        <Input
            input_type=input_type
            value=text
            disabled=disabled
            on_input=Callback::new(move |raw: String| {
                let next = text_value(&raw).map(|s| match kind {
                    WidgetKind::Date => WidgetValue::Date(s),
                    WidgetKind::Time => WidgetValue::Time(s),
                    _ => WidgetValue::Text(s),
                });
                emit.run(next);
            })
        />
    }
}

#[component]
pub fn NumberInput(
    widget: Widget,
    value: Signal<Option<WidgetValue>, LocalStorage>,
    emit: Callback<Option<WidgetValue>>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let bounds = match &widget.properties {
        WidgetProperties::Number(p) => p.clone(),
        _ => NumberProperties::default(),
    };
    let placeholder = match (bounds.min(), bounds.max()) {
        (Some(min), Some(max)) => format!("{} to {}", min, max),
        (Some(min), None) => format!("At least {}", min),
        (None, Some(max)) => format!("At most {}", max),
        (None, None) => String::new(),
    };
    let text = Signal::derive(move || {
        value.with(|v| match v {
            Some(WidgetValue::Number(n)) => n.to_string(),
            _ => String::new(),
        })
    });
    // Out-of-range values are reported but still emitted
    let error = Signal::derive(move || {
        value.with(|v| validate_value(v.as_ref(), &widget).message("value").map(str::to_string))
    });

    view! {
        <Input
            input_type="number"
            placeholder=placeholder
            value=text
            disabled=disabled
            on_input=Callback::new(move |raw: String| emit.run(number_value(&raw).map(WidgetValue::Number)))
        />
        <FieldError error=error />
    }
}

#[component]
pub fn DateRangeInput(
    value: Signal<Option<WidgetValue>, LocalStorage>,
    emit: Callback<Option<WidgetValue>>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let current = move || {
        value.with(|v| match v {
            Some(WidgetValue::DateRange(r)) => r.clone(),
            _ => DateRangeValue::default(),
        })
    };
    let set = move |start: Option<String>, end: Option<String>| {
        let mut range = current();
        if let Some(start) = start {
            range.start_date = start;
        }
        if let Some(end) = end {
            range.end_date = end;
        }
        let cleared = range.start_date.is_empty() && range.end_date.is_empty();
        emit.run((!cleared).then_some(WidgetValue::DateRange(range)));
    };

    view! {
        <div class="widget-input__range">
            <Input
                input_type="date"
                value=Signal::derive(move || current().start_date)
                disabled=disabled
                on_input=Callback::new(move |start: String| set(Some(start), None))
            />
            <span class="widget-input__range-sep">"-"</span>
            <Input
                input_type="date"
                value=Signal::derive(move || current().end_date)
                disabled=disabled
                on_input=Callback::new(move |end: String| set(None, Some(end)))
            />
        </div>
    }
}

#[component]
pub fn TimeRangeInput(
    value: Signal<Option<WidgetValue>, LocalStorage>,
    emit: Callback<Option<WidgetValue>>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let current = move || {
        value.with(|v| match v {
            Some(WidgetValue::TimeRange(r)) => r.clone(),
            _ => TimeRangeValue::default(),
        })
    };
    let set = move |start: Option<String>, end: Option<String>| {
        let mut range = current();
        if let Some(start) = start {
            range.start_time = start;
        }
        if let Some(end) = end {
            range.end_time = end;
        }
        let cleared = range.start_time.is_empty() && range.end_time.is_empty();
        emit.run((!cleared).then_some(WidgetValue::TimeRange(range)));
    };

    view! {
        <div class="widget-input__range">
            <Input
                input_type="time"
                value=Signal::derive(move || current().start_time)
                disabled=disabled
                on_input=Callback::new(move |start: String| set(Some(start), None))
            />
            <span class="widget-input__range-sep">"-"</span>
            <Input
                input_type="time"
                value=Signal::derive(move || current().end_time)
                disabled=disabled
                on_input=Callback::new(move |end: String| set(None, Some(end)))
            />
        </div>
    }
}
