use super::super::view_model::WidgetEditorViewModel;
use crate::shared::components::ui::{Button, Checkbox, FieldError, Input, Select};
use crate::shared::icons::icon;
use contracts::domain::a001_widget::input::toggle_key;
use contracts::domain::a001_widget::items::ChoiceOption;
use contracts::domain::a001_widget::properties::CHOICE_OPTIONS_LIMIT;
use contracts::domain::a001_widget::{Widget, WidgetProperties};
use contracts::enums::WidgetKind;
use leptos::prelude::*;

fn options(w: &Widget) -> &[ChoiceOption] {
    match &w.properties {
        WidgetProperties::Select(p) => &p.options,
        WidgetProperties::MultiSelect(p) => &p.options,
        _ => &[],
    }
}

fn options_mut(w: &mut Widget) -> Option<&mut Vec<ChoiceOption>> {
    match &mut w.properties {
        WidgetProperties::Select(p) => Some(&mut p.options),
        WidgetProperties::MultiSelect(p) => Some(&mut p.options),
        _ => None,
    }
}

/// Options of SELECT and MULTISELECT widgets plus their default
#[component]
pub fn ChoiceSection(vm: WidgetEditorViewModel) -> impl IntoView {
    let is_multi = vm.with_draft(|w| w.kind() == WidgetKind::MultiSelect);
    let keys = move || vm.with_draft(|w| options(w).iter().map(|o| o.key.clone()).collect::<Vec<_>>());
    let at_limit = Signal::derive(move || vm.with_draft(|w| options(w).len() >= CHOICE_OPTIONS_LIMIT));

    let option_view = move |key: String| {
        let field = |f: fn(&ChoiceOption) -> String| {
            let key = key.clone();
            Signal::derive(move || {
                vm.with_draft(|w| options(w).iter().find(|o| o.key == key).map(f).unwrap_or_default())
            })
        };
        let label = field(|o| o.label.clone());
        let tooltip = field(|o| o.tooltip.clone().unwrap_or_default());
        let label_error = {
            let key = key.clone();
            Signal::derive(move || vm.error(&["properties", "options", &key, "label"]))
        };
        let (k1, k2, k3, k4, k5) = (key.clone(), key.clone(), key.clone(), key.clone(), key);

        let move_by = move |key: String, delta: isize| {
            vm.edit(|w| {
                if let Some(index) = options(w).iter().position(|o| o.key == key) {
                    let to = index as isize + delta;
                    if to >= 0 {
                        match &mut w.properties {
                            WidgetProperties::Select(p) => p.move_option(index, to as usize),
                            WidgetProperties::MultiSelect(p) => p.move_option(index, to as usize),
                            _ => false,
                        };
                    }
                }
            })
        };

        view! {
            <div class="widget-editor__item">
                <Input
                    placeholder="Label"
                    value=label
                    on_input=Callback::new(move |text: String| {
                        vm.edit(|w| {
                            if let Some(o) = options_mut(w).and_then(|o| o.iter_mut().find(|o| o.key == k1)) {
                                o.label = text;
                            }
                        })
                    })
                    error=label_error
                />
                <Input
                    placeholder="Tooltip"
                    value=tooltip
                    on_input=Callback::new(move |text: String| {
                        vm.edit(|w| {
                            if let Some(o) = options_mut(w).and_then(|o| o.iter_mut().find(|o| o.key == k2)) {
                                o.tooltip = Some(text).filter(|t| !t.is_empty());
                            }
                        })
                    })
                />
                <Button variant="ghost" title="Move up" on_click=Callback::new(move |_| move_by(k3.clone(), -1))>
                    {icon("arrow-up")}
                </Button>
                <Button variant="ghost" title="Move down" on_click=Callback::new(move |_| move_by(k4.clone(), 1))>
                    {icon("arrow-down")}
                </Button>
                <Button
                    variant="ghost"
                    title="Remove option"
                    on_click=Callback::new(move |_| {
                        vm.edit(|w| match &mut w.properties {
                            WidgetProperties::Select(p) => {
                                p.remove_option(&k5);
                            }
                            WidgetProperties::MultiSelect(p) => {
                                p.remove_option(&k5);
                            }
                            _ => {}
                        })
                    })
                >
                    {icon("delete")}
                </Button>
            </div>
        }
    };

    let choices = Signal::derive(move || {
        vm.with_draft(|w| {
            options(w)
                .iter()
                .map(|o| (o.key.clone(), o.label.clone()))
                .collect::<Vec<_>>()
        })
    });

    let default_view = if is_multi {
        view! {
            <div class="widget-editor__defaults">
                <span class="form__label">"Default options"</span>
                <For
                    each=move || choices.get()
                    key=|(key, label)| (key.clone(), label.clone())
                    children=move |(key, label)| {
                        let checked = {
                            let key = key.clone();
                            Signal::derive(move || {
                                vm.with_draft(|w| match &w.properties {
                                    WidgetProperties::MultiSelect(p) => p
                                        .default_value
                                        .as_ref()
                                        .is_some_and(|d| d.contains(&key)),
                                    _ => false,
                                })
                            })
                        };
                        view! {
                            <Checkbox
                                label=label
                                checked=checked
                                on_change=Callback::new(move |_| {
                                    vm.edit(|w| {
                                        if let WidgetProperties::MultiSelect(p) = &mut w.properties {
                                            let next = toggle_key(p.default_value.as_deref(), &key);
                                            p.default_value = Some(next).filter(|d| !d.is_empty());
                                        }
                                    })
                                })
                            />
                        }
                    }
                />
            </div>
        }
        .into_any()
    } else {
        view! {
            <Select
                label="Default option"
                placeholder="None"
                options=choices
                value=Signal::derive(move || {
                    vm.with_draft(|w| match &w.properties {
                        WidgetProperties::Select(p) => p.default_value.clone().unwrap_or_default(),
                        _ => String::new(),
                    })
                })
                on_change=Callback::new(move |key: String| {
                    vm.edit(|w| {
                        if let WidgetProperties::Select(p) = &mut w.properties {
                            p.default_value = Some(key).filter(|k| !k.is_empty());
                        }
                    })
                })
                error=Signal::derive(move || vm.error(&["properties", "defaultValue"]))
            />
        }
        .into_any()
    };

    view! {
        <div class="widget-editor__section">
            <h4>"Options"</h4>
            <For each=keys key=|key| key.clone() children=option_view />
            <FieldError error=Signal::derive(move || vm.non_field_errors(&["properties", "options"]).into_iter().next()) />
            <Button
                variant="secondary"
                disabled=at_limit
                on_click=Callback::new(move |_| {
                    vm.edit(|w| match &mut w.properties {
                        WidgetProperties::Select(p) => {
                            p.add_option();
                        }
                        WidgetProperties::MultiSelect(p) => {
                            p.add_option();
                        }
                        _ => {}
                    })
                })
            >
                {icon("add")}
                "Add option"
            </Button>
            {default_view}
        </div>
    }
}
