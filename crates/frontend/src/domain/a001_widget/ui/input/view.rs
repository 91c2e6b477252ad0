use super::basic::{DateRangeInput, NumberInput, SingleTextInput, TimeRangeInput};
use super::choice::{MultiSelectInput, ScaleInput, SelectInput};
use super::display::ReadOnlyValue;
use super::geo::{GeoInput, GeoOptions};
use super::matrix::{Matrix1dInput, Matrix2dInput};
use super::organigram::OrganigramInput;
use contracts::domain::a001_widget::{Widget, WidgetValue};
use contracts::enums::WidgetKind;
use leptos::prelude::*;

/// Value input of one widget.
///
/// `name` is handed back with every change so the owner can route it;
/// `read_only` renders the resolved labels instead of controls.
#[component]
pub fn WidgetInput(
    widget: Widget,
    #[prop(into)] name: String,
    value: Signal<Option<WidgetValue>, LocalStorage>,
    on_change: Callback<(Option<WidgetValue>, String)>,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional)] read_only: bool,
    #[prop(optional_no_strip)] geo: Option<GeoOptions>,
) -> impl IntoView {
    if read_only {
        return view! { <ReadOnlyValue widget=widget value=value geo=geo /> }.into_any();
    }

    let emit = Callback::new(move |next: Option<WidgetValue>| on_change.run((next, name.clone())));
    let kind = widget.kind();

    let control = match kind {
        WidgetKind::Text => view! { <SingleTextInput kind=kind value=value emit=emit disabled=disabled /> }.into_any(),
        WidgetKind::Date => view! { <SingleTextInput kind=kind value=value emit=emit disabled=disabled /> }.into_any(),
        WidgetKind::Time => view! { <SingleTextInput kind=kind value=value emit=emit disabled=disabled /> }.into_any(),
        WidgetKind::Number => view! { <NumberInput widget=widget value=value emit=emit disabled=disabled /> }.into_any(),
        WidgetKind::DateRange => view! { <DateRangeInput value=value emit=emit disabled=disabled /> }.into_any(),
        WidgetKind::TimeRange => view! { <TimeRangeInput value=value emit=emit disabled=disabled /> }.into_any(),
        WidgetKind::Scale => view! { <ScaleInput widget=widget value=value emit=emit disabled=disabled /> }.into_any(),
        WidgetKind::Select => view! { <SelectInput widget=widget value=value emit=emit disabled=disabled /> }.into_any(),
        WidgetKind::MultiSelect => view! { <MultiSelectInput widget=widget value=value emit=emit disabled=disabled /> }.into_any(),
        WidgetKind::Matrix1d => view! { <Matrix1dInput widget=widget value=value emit=emit disabled=disabled /> }.into_any(),
        WidgetKind::Matrix2d => view! { <Matrix2dInput widget=widget value=value emit=emit disabled=disabled /> }.into_any(),
        WidgetKind::Organigram => view! { <OrganigramInput widget=widget value=value emit=emit disabled=disabled /> }.into_any(),
        WidgetKind::Geo => match geo {
            Some(geo) => view! { <GeoInput value=value emit=emit disabled=disabled geo=geo /> }.into_any(),
            None => {
                log::warn!("Geo input rendered without geo options");
                view! { <ReadOnlyValue widget=widget value=value geo=None /> }.into_any()
            }
        },
    };

    view! { <div class="widget-input" data-widget-kind=kind.code()>{control}</div> }.into_any()
}
