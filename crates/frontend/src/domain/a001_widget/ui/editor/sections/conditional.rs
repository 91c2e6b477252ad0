use super::super::view_model::WidgetEditorViewModel;
use crate::shared::components::ui::{Button, Checkbox, FieldError, Input, Select};
use crate::shared::icons::icon;
use contracts::domain::a001_widget::conditional::{
    condition_choices, ConditionValue, Modifier, OperandShape, CONDITIONS_LIMIT,
};
use contracts::domain::a001_widget::input::toggle_key;
use contracts::domain::a001_widget::{Condition, ConditionOperator, Conditional, Conjunction, Widget};
use contracts::domain::common::list_item::{find_item, sort_by_order};
use contracts::domain::common::ListItem;
use leptos::prelude::*;

fn read_condition<R: Default>(vm: WidgetEditorViewModel, key: &str, f: impl FnOnce(&Condition) -> R) -> R {
    vm.with_draft(|w| {
        w.conditional
            .as_ref()
            .and_then(|c| find_item(&c.conditions, key))
            .map(f)
            .unwrap_or_default()
    })
}

fn edit_condition(vm: WidgetEditorViewModel, key: &str, f: impl FnOnce(&mut Condition)) {
    vm.edit(|w| {
        if let Some(condition) = w.conditional.as_mut().and_then(|c| c.condition_mut(key)) {
            f(condition);
        }
    });
}

fn operand_text(condition: &Condition) -> String {
    match &condition.value {
        Some(ConditionValue::Number(n)) => n.to_string(),
        Some(ConditionValue::Text(s)) => s.clone(),
        _ => String::new(),
    }
}

fn operand_from_text(shape: OperandShape, text: String) -> Option<ConditionValue> {
    if text.trim().is_empty() {
        return None;
    }
    match shape {
        OperandShape::Number => match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Some(ConditionValue::Number(n)),
            _ => Some(ConditionValue::Text(text)),
        },
        _ => Some(ConditionValue::Text(text)),
    }
}

/// One condition: operator, invert flag, operand and the conjunction to the next one
#[component]
fn ConditionRow(
    vm: WidgetEditorViewModel,
    key: String,
    parent: StoredValue<Option<Widget>>,
    #[prop(into)] is_last: Signal<bool>,
) -> impl IntoView {
    let k = StoredValue::new(key);
    let operator = Signal::derive(move || k.with_value(|k| read_condition(vm, k, |c| c.operator)));
    let inverted = Signal::derive(move || k.with_value(|k| read_condition(vm, k, |c| c.invert)));

    let operators = Signal::derive(move || {
        let invert = inverted.get();
        parent.with_value(|p| {
            p.as_ref()
                .map(|p| ConditionOperator::for_kind(p.kind()))
                .unwrap_or_else(|| vec![ConditionOperator::Empty])
                .into_iter()
                .map(|op| (op.code().to_string(), op.label(invert).to_string()))
                .collect::<Vec<_>>()
        })
    });
    let modifiers = Signal::derive(|| {
        vec![
            (Modifier::Some.code().to_string(), "Some of".to_string()),
            (Modifier::Every.code().to_string(), "Every one of".to_string()),
        ]
    });
    let conjunctions = Signal::derive(|| {
        Conjunction::all()
            .into_iter()
            .map(|c| (c.code().to_string(), c.code().to_string()))
            .collect::<Vec<_>>()
    });
    let choices = Signal::derive(move || {
        let op = operator.get();
        parent.with_value(|p| p.as_ref().map(|p| condition_choices(op, p)).unwrap_or_default())
    });
    let error = move |field: &'static str| {
        Signal::derive(move || k.with_value(|k| vm.error(&["conditional", "conditions", k.as_str(), field])))
    };

    let operand = move || {
        let shape = operator.get().operand();
        match shape {
            OperandShape::None => ().into_any(),
            OperandShape::Number | OperandShape::Text | OperandShape::Date | OperandShape::Time => {
                let input_type = match shape {
                    OperandShape::Number => "number",
                    OperandShape::Date => "date",
                    OperandShape::Time => "time",
                    _ => "text",
                };
                view! {
                    <Input
                        placeholder="Value"
                        input_type=input_type
                        value=Signal::derive(move || k.with_value(|k| read_condition(vm, k, operand_text)))
                        on_input=Callback::new(move |text: String| {
                            k.with_value(|k| edit_condition(vm, k, |c| c.value = operand_from_text(shape, text)))
                        })
                        error=error("value")
                    />
                }
                .into_any()
            }
            OperandShape::Key => view! {
                <Select
                    label="Point"
                    options=Signal::derive(move || {
                        let mut options = vec![(String::new(), "Select a point".to_string())];
                        options.extend(choices.get());
                        options
                    })
                    value=Signal::derive(move || k.with_value(|k| read_condition(vm, k, operand_text)))
                    on_change=Callback::new(move |key: String| {
                        k.with_value(|k| edit_condition(vm, k, |c| c.value = operand_from_text(OperandShape::Key, key)))
                    })
                    error=error("value")
                />
            }
            .into_any(),
            OperandShape::Keys => view! {
                <div class="widget-editor__choices">
                    <For
                        each=move || choices.get()
                        key=|(key, _)| key.clone()
                        children=move |(choice, label)| {
                            let c1 = choice.clone();
                            let checked = Signal::derive(move || {
                                k.with_value(|k| {
                                    read_condition(vm, k, |c| {
                                        c.value.as_ref().is_some_and(|v| v.as_keys().contains(&c1))
                                    })
                                })
                            });
                            view! {
                                <Checkbox
                                    label=label
                                    checked=checked
                                    on_change=Callback::new(move |_: bool| {
                                        k.with_value(|k| {
                                            edit_condition(vm, k, |c| {
                                                let current = c.value.as_ref().map(|v| v.as_keys().to_vec());
                                                let next = toggle_key(current.as_deref(), &choice);
                                                c.value = Some(ConditionValue::Keys(next));
                                            })
                                        })
                                    })
                                />
                            }
                        }
                    />
                    <FieldError error=error("value") />
                </div>
            }
            .into_any(),
        }
    };

    view! {
        <div class="widget-editor__item widget-editor__condition">
            <Select
                options=operators
                value=Signal::derive(move || operator.get().code().to_string())
                on_change=Callback::new(move |code: String| {
                    if let Some(op) = ConditionOperator::from_code(&code) {
                        k.with_value(|k| edit_condition(vm, k, |c| c.set_operator(op)));
                    }
                })
                error=error("operator")
            />
            <Checkbox
                label="Invert"
                checked=inverted
                on_change=Callback::new(move |on: bool| k.with_value(|k| edit_condition(vm, k, |c| c.invert = on)))
            />
            <Show when=move || operator.get().has_modifier()>
                <Select
                    options=modifiers
                    value=Signal::derive(move || {
                        k.with_value(|k| read_condition(vm, k, |c| c.operator_modifier.unwrap_or_default().code().to_string()))
                    })
                    on_change=Callback::new(move |code: String| {
                        let modifier = Modifier::from_code(&code);
                        k.with_value(|k| edit_condition(vm, k, |c| c.operator_modifier = modifier));
                    })
                    error=error("operatorModifier")
                />
            </Show>
            {operand}
            <Show when=move || !is_last.get()>
                <Select
                    options=conjunctions
                    value=Signal::derive(move || {
                        k.with_value(|k| read_condition(vm, k, |c| c.conjunction_operator.code().to_string()))
                    })
                    on_change=Callback::new(move |code: String| {
                        if let Some(conjunction) = Conjunction::from_code(&code) {
                            k.with_value(|k| edit_condition(vm, k, |c| c.conjunction_operator = conjunction));
                        }
                    })
                />
            </Show>
            <Button
                variant="ghost"
                size="sm"
                title="Remove condition"
                disabled=Signal::derive(move || vm.with_draft(|w| w.conditional.as_ref().map_or(0, |c| c.conditions.len()) <= 1))
                on_click=Callback::new(move |_| {
                    vm.edit(|w| {
                        if let Some(c) = w.conditional.as_mut() {
                            k.with_value(|k| c.remove_condition(k));
                        }
                    })
                })
            >
                {icon("delete")}
            </Button>
        </div>
    }
}

/// Visibility rule: show the widget only while a parent widget's value matches
#[component]
pub fn ConditionalSection(vm: WidgetEditorViewModel, parents: Vec<Widget>) -> impl IntoView {
    let candidates = StoredValue::new(parents);
    let parent_id = Signal::derive(move || {
        vm.field(Widget::conditional_lens())
            .map(|c| c.parent_client_id)
            .unwrap_or_default()
    });
    let parent = Memo::new(move |_| {
        let id = parent_id.get();
        candidates.with_value(|ws| ws.iter().find(|w| w.client_id == id).cloned())
    });
    let parent_options = Signal::derive(move || {
        let mut options = vec![(String::new(), "Always shown".to_string())];
        candidates.with_value(|ws| {
            options.extend(ws.iter().map(|w| {
                let title = if w.title.is_empty() { w.kind().display_name().to_string() } else { w.title.clone() };
                (w.client_id.clone(), title)
            }))
        });
        options
    });
    let keys = move || {
        vm.with_draft(|w| {
            w.conditional
                .as_ref()
                .map(|c| sort_by_order(&c.conditions).iter().map(|c| c.item_key().to_string()).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };
    let count = Signal::derive(move || vm.with_draft(|w| w.conditional.as_ref().map_or(0, |c| c.conditions.len())));
    let next_conjunction = RwSignal::new(Conjunction::And.code().to_string());

    view! {
        <div class="widget-editor__section">
            <h4>"Visibility"</h4>
            <Select
                label="Show only when"
                options=parent_options
                value=parent_id
                on_change=Callback::new(move |id: String| {
                    let next = candidates.with_value(|ws| {
                        ws.iter().find(|w| w.client_id == id).map(Conditional::new)
                    });
                    vm.set_field(Widget::conditional_lens(), next);
                })
                error=Signal::derive(move || vm.error(&["conditional", "parentClientId"]))
            />
            {move || {
                vm.non_field_errors(&["conditional"])
                    .into_iter()
                    .map(|message| view! { <div class="error">{message}</div> })
                    .collect_view()
            }}
            <Show when=move || parent.with(|p| p.is_some())>
                {move || {
                    let stored = StoredValue::new(parent.get());
                    view! {
                        <For
                            each=keys
                            key=|key| key.clone()
                            children=move |key| {
                                let last = {
                                    let key = key.clone();
                                    Signal::derive(move || keys().last() == Some(&key))
                                };
                                view! { <ConditionRow vm=vm key=key parent=stored is_last=last /> }
                            }
                        />
                    }
                }}
                <div class="widget-editor__add">
                    <Select
                        options=Signal::derive(|| {
                            Conjunction::all()
                                .into_iter()
                                .map(|c| (c.code().to_string(), c.code().to_string()))
                                .collect::<Vec<_>>()
                        })
                        value=next_conjunction
                        on_change=Callback::new(move |code: String| next_conjunction.set(code))
                    />
                    <Button
                        variant="secondary"
                        size="sm"
                        disabled=Signal::derive(move || count.get() >= CONDITIONS_LIMIT)
                        on_click=Callback::new(move |_| {
                            let conjunction = Conjunction::from_code(&next_conjunction.get_untracked()).unwrap_or_default();
                            vm.edit(|w| {
                                if let Some(c) = w.conditional.as_mut() {
                                    c.add_condition(conjunction);
                                }
                            });
                        })
                    >
                        {icon("add")}
                        "Add condition"
                    </Button>
                </div>
            </Show>
        </div>
    }
}
