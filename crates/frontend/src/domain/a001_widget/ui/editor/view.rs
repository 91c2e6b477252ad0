use super::sections::*;
use super::view_model::WidgetEditorViewModel;
use crate::shared::components::ui::{Badge, Button, Input, Select};
use crate::shared::icons::icon;
use contracts::domain::a001_widget::Widget;
use contracts::enums::{WidgetKind, WidgetWidth};
use leptos::prelude::*;

fn section_for(vm: WidgetEditorViewModel, kind: WidgetKind) -> AnyView {
    match kind {
        WidgetKind::Text => view! { <SingleDefaultSection vm=vm input_type="text" /> }.into_any(),
        WidgetKind::Date => view! { <SingleDefaultSection vm=vm input_type="date" /> }.into_any(),
        WidgetKind::Time => view! { <SingleDefaultSection vm=vm input_type="time" /> }.into_any(),
        WidgetKind::Number => view! { <NumberSection vm=vm /> }.into_any(),
        WidgetKind::DateRange => view! { <DateRangeSection vm=vm /> }.into_any(),
        WidgetKind::TimeRange => view! { <TimeRangeSection vm=vm /> }.into_any(),
        WidgetKind::Scale => view! { <ScaleSection vm=vm /> }.into_any(),
        WidgetKind::Select | WidgetKind::MultiSelect => view! { <ChoiceSection vm=vm /> }.into_any(),
        WidgetKind::Matrix1d => view! { <Matrix1dSection vm=vm /> }.into_any(),
        WidgetKind::Matrix2d => view! { <Matrix2dSection vm=vm /> }.into_any(),
        WidgetKind::Organigram => view! { <OrganigramSection vm=vm /> }.into_any(),
        WidgetKind::Geo => view! { <GeoSection /> }.into_any(),
    }
}

/// Configuration editor of one widget.
///
/// `on_change` receives the draft after every edit, `on_save` only a draft
/// that passed validation, `on_cancel` fires after in-flight edits are dropped.
#[component]
pub fn WidgetEditor(
    initial_value: Widget,
    on_change: Callback<Widget>,
    on_save: Callback<Widget>,
    on_cancel: Callback<()>,
    /// Widgets that may serve as the conditional parent
    #[prop(optional)]
    parents: Vec<Widget>,
) -> impl IntoView {
    let kind = initial_value.kind();
    let vm = WidgetEditorViewModel::new(initial_value, on_change);

    let widths = Signal::derive(|| {
        vec![
            (WidgetWidth::Full.code().to_string(), "Full width".to_string()),
            (WidgetWidth::Half.code().to_string(), "Half width".to_string()),
        ]
    });

    view! {
        <div class="widget-editor" data-widget-kind=kind.code()>
            <div class="widget-editor__header">
                <Badge variant="kind">{kind.display_name()}</Badge>
                {move || vm.is_dirty().then(|| view! { <span class="widget-editor__dirty">"Unsaved changes"</span> })}
            </div>

            {move || {
                vm.non_field_errors(&[])
                    .into_iter()
                    .map(|message| view! { <div class="error">{message}</div> })
                    .collect_view()
            }}

            <div class="widget-editor__row">
                <Input
                    label="Title"
                    value=Signal::derive(move || vm.field(Widget::title_lens()))
                    on_input=Callback::new(move |title: String| vm.set_field(Widget::title_lens(), title))
                    error=Signal::derive(move || vm.error(&["title"]))
                />
                <Select
                    label="Width"
                    options=widths
                    value=Signal::derive(move || vm.field(Widget::width_lens()).code().to_string())
                    on_change=Callback::new(move |code: String| {
                        if let Some(width) = WidgetWidth::from_code(&code) {
                            vm.set_field(Widget::width_lens(), width);
                        }
                    })
                />
            </div>

            {section_for(vm, kind)}

            <ConditionalSection vm=vm parents=parents />

            <div class="details-actions">
                <Button
                    variant="primary"
                    on_click=Callback::new(move |_| vm.save_command(on_save))
                >
                    {icon("save")}
                    "Save"
                </Button>
                <Button
                    variant="secondary"
                    on_click=Callback::new(move |_| vm.cancel_command(on_cancel))
                >
                    {icon("cancel")}
                    "Cancel"
                </Button>
            </div>
        </div>
    }
}
