use super::super::view_model::WidgetEditorViewModel;
use super::*;
use crate::shared::components::ui::{FieldError, Input};
use contracts::domain::a001_widget::input::text_value;
use contracts::domain::a001_widget::properties::{NumberProperties, NumericField};
use contracts::domain::a001_widget::value::{DateRangeValue, TimeRangeValue};
use leptos::prelude::*;

/// Default value of TEXT, DATE and TIME widgets
#[component]
pub fn SingleDefaultSection(
    vm: WidgetEditorViewModel,
    /// "text", "date" or "time"
    input_type: &'static str,
) -> impl IntoView {
    let value = Signal::derive(move || {
        vm.read(single_default, |p| p.default_value.clone().unwrap_or_default())
    });

    view! {
        <Input
            label="Default value"
            input_type=input_type
            value=value
            on_input=Callback::new(move |text: String| {
                vm.edit_props(single_default_mut, |p| p.default_value = text_value(&text))
            })
            error=Signal::derive(move || vm.error(&["properties", "defaultValue"]))
        />
    }
}

#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
    Default,
}

impl Bound {
    fn field(self) -> &'static str {
        match self {
            Bound::Min => "minValue",
            Bound::Max => "maxValue",
            Bound::Default => "defaultValue",
        }
    }

    fn slot(self, p: &mut NumberProperties) -> &mut Option<NumericField> {
        match self {
            Bound::Min => &mut p.min_value,
            Bound::Max => &mut p.max_value,
            Bound::Default => &mut p.default_value,
        }
    }

    fn get(self, p: &NumberProperties) -> Option<&NumericField> {
        match self {
            Bound::Min => p.min_value.as_ref(),
            Bound::Max => p.max_value.as_ref(),
            Bound::Default => p.default_value.as_ref(),
        }
    }
}

#[component]
pub fn NumberSection(vm: WidgetEditorViewModel) -> impl IntoView {
    let field = move |bound: Bound, label: &'static str| {
        let value = Signal::derive(move || {
            vm.read(number, |p| bound.get(p).map(NumericField::to_input).unwrap_or_default())
        });
        view! {
            <Input
                label=label
                value=value
                on_input=Callback::new(move |text: String| {
                    vm.edit_props(number_mut, |p| *bound.slot(p) = NumericField::from_input(&text))
                })
                error=Signal::derive(move || vm.error(&["properties", bound.field()]))
            />
        }
    };

    view! {
        <div class="widget-editor__section">
            <For
                each=move || vm.non_field_errors(&["properties"])
                key=|message| message.clone()
                children=|message| view! { <div class="form__error">{message}</div> }
            />
            <div class="widget-editor__row">
                {field(Bound::Min, "Min value")}
                {field(Bound::Max, "Max value")}
            </div>
            {field(Bound::Default, "Default value")}
        </div>
    }
}

#[component]
pub fn DateRangeSection(vm: WidgetEditorViewModel) -> impl IntoView {
    let current = move || vm.read(date_range, |p| p.default_value.clone().unwrap_or_default());
    let set = move |f: Box<dyn FnOnce(&mut DateRangeValue)>| {
        vm.edit_props(date_range_mut, |p| {
            let mut range = p.default_value.clone().unwrap_or_default();
            f(&mut range);
            p.default_value = if range.start_date.is_empty() && range.end_date.is_empty() {
                None
            } else {
                Some(range)
            };
        })
    };

    view! {
        <div class="widget-editor__row">
            <Input
                label="Default start"
                input_type="date"
                value=Signal::derive(move || current().start_date)
                on_input=Callback::new(move |text: String| set(Box::new(move |r: &mut DateRangeValue| r.start_date = text)))
            />
            <Input
                label="Default end"
                input_type="date"
                value=Signal::derive(move || current().end_date)
                on_input=Callback::new(move |text: String| set(Box::new(move |r: &mut DateRangeValue| r.end_date = text)))
            />
        </div>
        <FieldError error=Signal::derive(move || vm.error(&["properties", "defaultValue"])) />
    }
}

#[component]
pub fn TimeRangeSection(vm: WidgetEditorViewModel) -> impl IntoView {
    let current = move || vm.read(time_range, |p| p.default_value.clone().unwrap_or_default());
    let set = move |f: Box<dyn FnOnce(&mut TimeRangeValue)>| {
        vm.edit_props(time_range_mut, |p| {
            let mut range = p.default_value.clone().unwrap_or_default();
            f(&mut range);
            p.default_value = if range.start_time.is_empty() && range.end_time.is_empty() {
                None
            } else {
                Some(range)
            };
        })
    };

    view! {
        <div class="widget-editor__row">
            <Input
                label="Default start"
                input_type="time"
                value=Signal::derive(move || current().start_time)
                on_input=Callback::new(move |text: String| set(Box::new(move |r: &mut TimeRangeValue| r.start_time = text)))
            />
            <Input
                label="Default end"
                input_type="time"
                value=Signal::derive(move || current().end_time)
                on_input=Callback::new(move |text: String| set(Box::new(move |r: &mut TimeRangeValue| r.end_time = text)))
            />
        </div>
        <FieldError error=Signal::derive(move || vm.error(&["properties", "defaultValue"])) />
    }
}

#[component]
pub fn GeoSection() -> impl IntoView {
    view! {
        <p class="widget-editor__hint">
            "Geo areas are picked per entry from the project's regions."
        </p>
    }
}
