use super::super::view_model::WidgetEditorViewModel;
use super::{organigram, organigram_mut};
use crate::shared::components::ui::{Button, FieldError, Input};
use crate::shared::icons::icon;
use contracts::domain::a001_widget::properties::ORGANIGRAM_NODES_LIMIT;
use contracts::domain::common::ListItem;
use leptos::prelude::*;

/// One node and its subtree. `path` is the error path of the node.
fn node_view(vm: WidgetEditorViewModel, key: String, path: Vec<String>) -> AnyView {
    let label = {
        let key = key.clone();
        Signal::derive(move || {
            vm.read(organigram, |p| {
                p.options
                    .as_ref()
                    .and_then(|root| root.find(&key))
                    .map(|n| n.label.clone())
                    .unwrap_or_default()
            })
        })
    };
    let error = {
        let path = path.clone();
        Signal::derive(move || {
            let mut full: Vec<&str> = path.iter().map(String::as_str).collect();
            full.push("label");
            vm.error(&full)
        })
    };
    // (item key, semantic key) of each child
    let children = {
        let key = key.clone();
        move || {
            vm.read(organigram, |p| {
                p.options
                    .as_ref()
                    .and_then(|root| root.find(&key))
                    .map(|n| {
                        let mut children = n.children.clone();
                        children.sort_by_key(|c| c.order());
                        children
                            .iter()
                            .map(|c| (c.item_key().to_string(), c.key.clone()))
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default()
            })
        }
    };
    let full = Signal::derive(move || vm.read(organigram, |p| p.node_count() >= ORGANIGRAM_NODES_LIMIT));
    let (k1, k2, k3) = (key.clone(), key.clone(), key);

    view! {
        <div class="organigram-editor__node">
            <div class="widget-editor__row">
                <Input
                    placeholder="Node label"
                    value=label
                    on_input=Callback::new(move |text: String| {
                        vm.edit_props(organigram_mut, |p| {
                            if let Some(node) = p.options.as_mut().and_then(|root| root.find_mut(&k1)) {
                                node.label = text;
                            }
                        })
                    })
                    error=error
                />
                <Button
                    variant="ghost"
                    title="Add child"
                    disabled=full
                    on_click=Callback::new(move |_| {
                        vm.edit_props(organigram_mut, |p| {
                            p.add_child(&k2);
                        })
                    })
                >
                    {icon("add")}
                </Button>
                <Button
                    variant="ghost"
                    title="Remove node"
                    on_click=Callback::new(move |_| {
                        vm.edit_props(organigram_mut, |p| {
                            p.remove_node(&k3);
                        })
                    })
                >
                    {icon("delete")}
                </Button>
            </div>
            <div class="organigram-editor__children">
                <For
                    each=children
                    key=|(item_key, _)| item_key.clone()
                    children=move |(item_key, child_key)| {
                        let mut child_path = path.clone();
                        child_path.push("children".to_string());
                        child_path.push(item_key);
                        node_view(vm, child_key, child_path)
                    }
                />
            </div>
        </div>
    }
    .into_any()
}

/// Tree of an ORGANIGRAM widget; an empty tree offers to create the root
#[component]
pub fn OrganigramSection(vm: WidgetEditorViewModel) -> impl IntoView {
    let root_key = Memo::new(move |_| vm.read(organigram, |p| p.options.as_ref().map(|root| root.key.clone())));

    view! {
        <div class="widget-editor__section organigram-editor">
            <h4>"Organigram"</h4>
            {move || match root_key.get() {
                Some(key) => node_view(vm, key, vec!["properties".to_string(), "options".to_string()]),
                None => view! {
                    <Button
                        variant="secondary"
                        on_click=Callback::new(move |_| {
                            vm.edit_props(organigram_mut, |p| {
                                p.root_mut();
                            })
                        })
                    >
                        {icon("add")}
                        "Add root node"
                    </Button>
                }
                .into_any(),
            }}
            <FieldError error=Signal::derive(move || vm.error(&["properties", "options"])) />
        </div>
    }
}
