use super::super::view_model::WidgetEditorViewModel;
use super::{scale, scale_mut};
use crate::shared::components::ui::{Button, Checkbox, FieldError, Input};
use crate::shared::icons::icon;
use contracts::domain::a001_widget::properties::SCALE_OPTIONS_LIMIT;
use contracts::domain::common::ListItem;
use leptos::prelude::*;

/// Scale points: label, color, tooltip and the single default point
#[component]
pub fn ScaleSection(vm: WidgetEditorViewModel) -> impl IntoView {
    let keys = move || vm.read(scale, |p| p.options.iter().map(|o| o.item_key().to_string()).collect::<Vec<_>>());
    let at_limit = Signal::derive(move || vm.read(scale, |p| p.options.len() >= SCALE_OPTIONS_LIMIT));

    let option_view = move |key: String| {
        let read = {
            let key = key.clone();
            move |f: fn(&contracts::domain::a001_widget::items::ScaleOption) -> String| {
                let key = key.clone();
                Signal::derive(move || {
                    vm.read(scale, |p| p.options.iter().find(|o| o.key == key).map(f).unwrap_or_default())
                })
            }
        };
        let error = {
            let key = key.clone();
            move |field: &'static str| {
                let key = key.clone();
                Signal::derive(move || vm.error(&["properties", "options", &key, field]))
            }
        };
        let is_default = {
            let key = key.clone();
            Signal::derive(move || vm.read(scale, |p| p.is_default(&key)))
        };
        let (k1, k2, k3, k4, k5) = (key.clone(), key.clone(), key.clone(), key.clone(), key);

        view! {
            <div class="widget-editor__item">
                <Input
                    input_type="color"
                    class="widget-editor__color"
                    value=read(|o| o.color.clone())
                    on_input=Callback::new(move |color: String| {
                        vm.edit_props(scale_mut, |p| {
                            if let Some(o) = p.option_mut(&k1) {
                                o.color = color;
                            }
                        })
                    })
                    error=error("color")
                />
                <Input
                    placeholder="Label"
                    value=read(|o| o.label.clone())
                    on_input=Callback::new(move |label: String| {
                        vm.edit_props(scale_mut, |p| {
                            if let Some(o) = p.option_mut(&k2) {
                                o.label = label;
                            }
                        })
                    })
                    error=error("label")
                />
                <Input
                    placeholder="Tooltip"
                    value=read(|o| o.tooltip.clone().unwrap_or_default())
                    on_input=Callback::new(move |tooltip: String| {
                        vm.edit_props(scale_mut, |p| {
                            if let Some(o) = p.option_mut(&k3) {
                                o.tooltip = Some(tooltip).filter(|t| !t.is_empty());
                            }
                        })
                    })
                />
                <Checkbox
                    label="Default"
                    checked=is_default
                    on_change=Callback::new(move |on: bool| {
                        vm.edit_props(scale_mut, |p| {
                            if on {
                                p.set_default(&k4);
                            } else if p.is_default(&k4) {
                                p.clear_default();
                            }
                        })
                    })
                />
                <Button
                    variant="ghost"
                    title="Remove point"
                    on_click=Callback::new(move |_| {
                        vm.edit_props(scale_mut, |p| {
                            p.remove_option(&k5);
                        })
                    })
                >
                    {icon("delete")}
                </Button>
            </div>
        }
    };

    view! {
        <div class="widget-editor__section">
            <h4>"Scale points"</h4>
            <For each=keys key=|key| key.clone() children=option_view />
            <FieldError error=Signal::derive(move || vm.non_field_errors(&["properties", "options"]).into_iter().next()) />
            <FieldError error=Signal::derive(move || vm.error(&["properties", "defaultValue"])) />
            <Button
                variant="secondary"
                disabled=at_limit
                on_click=Callback::new(move |_| {
                    vm.edit_props(scale_mut, |p| {
                        p.add_option();
                    })
                })
            >
                {icon("add")}
                "Add point"
            </Button>
        </div>
    }
}
