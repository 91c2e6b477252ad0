use super::editor::WidgetEditor;
use super::input::{GeoOptions, WidgetInput};
use contracts::domain::a001_widget::{dispatch, Widget, WidgetMode, WidgetRecord, WidgetSurface, WidgetValue};
use leptos::prelude::*;

/// Renders the editor or the input of a stored widget depending on `mode`.
/// Widgets of an unknown kind render nothing.
#[component]
pub fn WidgetSlot(
    record: WidgetRecord,
    mode: WidgetMode,
    value: Signal<Option<WidgetValue>, LocalStorage>,
    on_value_change: Callback<(Option<WidgetValue>, String)>,
    on_widget_change: Callback<Widget>,
    on_widget_save: Callback<Widget>,
    on_widget_cancel: Callback<()>,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional)] read_only: bool,
    #[prop(optional_no_strip)] geo: Option<GeoOptions>,
    #[prop(optional)] parents: Vec<Widget>,
) -> impl IntoView {
    let Some(surface) = dispatch(&record.widget_id, mode) else {
        log::debug!("No component for widget kind {:?}", record.widget_id);
        return ().into_any();
    };
    let Some(widget) = record.resolve() else {
        log::warn!("Widget {} could not be resolved", record.client_id);
        return ().into_any();
    };

    match surface {
        WidgetSurface::Editor(_) => view! {
            <WidgetEditor
                initial_value=widget
                on_change=on_widget_change
                on_save=on_widget_save
                on_cancel=on_widget_cancel
                parents=parents
            />
        }
        .into_any(),
        WidgetSurface::Input(_) => {
            let name = widget.client_id.clone();
            let title = widget.title.clone();
            view! {
                <div class="widget-slot">
                    <div class="widget-slot__title">{title}</div>
                    <WidgetInput
                        widget=widget
                        name=name
                        value=value
                        on_change=on_value_change
                        disabled=disabled
                        read_only=read_only
                        geo=geo
                    />
                </div>
            }
            .into_any()
        }
    }
}
