use super::view_model::{mappable_widgets, TaggingViewModel};
use crate::shared::components::ui::{Badge, Button, Checkbox};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_PANEL};
use contracts::domain::a001_widget::Widget;
use contracts::domain::a003_mapping::possible_mappings;
use contracts::enums::WidgetKind;
use leptos::prelude::*;
use thaw::{Flex, FlexGap};

fn tag_groups_view(vm: TaggingViewModel) -> impl IntoView {
    move || {
        vm.tag_groups()
            .into_iter()
            .map(|(group, tags)| {
                view! {
                    <div class="tagging__group">
                        <div class="tagging__group-title">{group}</div>
                        {tags
                            .into_iter()
                            .map(|tag| {
                                let id = tag.id.clone();
                                let (id_selected, id_count) = (id.clone(), id.clone());
                                view! {
                                    <button
                                        class="tagging__tag"
                                        class:tagging__tag--selected=move || {
                                            vm.selected_tag.get().as_deref() == Some(id_selected.as_str())
                                        }
                                        on:click=move |_| vm.select_tag(id.clone())
                                    >
                                        {tag.name}
                                        <span class="tagging__tag-count">
                                            {move || vm.mappings.with(|m| m.tag_count(&id_count))}
                                        </span>
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                }
            })
            .collect_view()
    }
}

fn widget_view(vm: TaggingViewModel, widget: Widget) -> AnyView {
    if widget.kind() == WidgetKind::Geo {
        let pk = widget.id.clone().unwrap_or_default();
        let title = widget.title.clone();
        return view! {
            <div class="tagging__widget">
                <Checkbox
                    label=title
                    checked=Signal::derive(move || vm.mappings.with(|m| m.is_geo_widget_mapped(&pk)))
                    on_change=Callback::new(move |_| vm.toggle_geo_command(&widget))
                />
            </div>
        }
        .into_any();
    }

    let elements = possible_mappings(&widget)
        .into_iter()
        .map(|possible| {
            let target = possible.target();
            let (w1, w2, w3) = (widget.clone(), widget.clone(), widget.clone());
            let (t1, t2, t3) = (target.clone(), target.clone(), target);
            view! {
                <button
                    class="tagging__element"
                    class:tagging__element--mapped=move || {
                        vm.selected_tag
                            .get()
                            .is_some_and(|tag| vm.mappings.with(|m| m.is_mapped(&w1, &t1, &tag)))
                    }
                    on:click=move |_| vm.toggle_command(&w2, &t2)
                >
                    {possible.label}
                    <Badge variant="count">{move || vm.mappings.with(|m| m.mapped_count(&w3, &t3))}</Badge>
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="tagging__widget">
            <div class="tagging__widget-title">{widget.title.clone()}</div>
            <div class="tagging__elements">{elements}</div>
        </div>
    }
    .into_any()
}

/// Side panel mapping prediction tags onto the framework's widgets
#[component]
pub fn TaggingPanel(
    vm: TaggingViewModel,
    #[prop(into)] widgets: Signal<Vec<Widget>>,
    #[prop(into)] framework_id: Signal<Option<String>>,
) -> impl IntoView {
    Effect::new(move |_| {
        if let Some(id) = framework_id.get() {
            vm.load(id);
        }
    });

    view! {
        <PageFrame page_id="a003_mapping--panel" category=PAGE_CAT_PANEL>
            <div class="tagging">
                <div class="tagging__header">
                    <h4>"Tag mapping"</h4>
                    <span class="tagging__coverage">
                        {move || format!("{:.2}% mapped", vm.coverage(&widgets.get()))}
                    </span>
                </div>

                {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

                <Flex class="tagging__tags" vertical=true gap=FlexGap::Small>{tag_groups_view(vm)}</Flex>

                <Flex class="tagging__widgets" vertical=true gap=FlexGap::Medium>
                    {move || {
                        mappable_widgets(widgets.get())
                            .into_iter()
                            .map(|widget| widget_view(vm, widget))
                            .collect_view()
                    }}
                </Flex>

                <Flex class="details-actions" gap=FlexGap::Small>
                    <Button
                        variant="secondary"
                        on_click=Callback::new(move |_| vm.auto_match_command(&widgets.get_untracked()))
                    >
                        "Auto-match"
                    </Button>
                    <Button
                        variant="primary"
                        disabled=Signal::derive(move || vm.saving.get() || !vm.dirty.get())
                        on_click=Callback::new(move |_| vm.save_command(framework_id.get_untracked()))
                    >
                        {icon("save")}
                        "Save mappings"
                    </Button>
                </Flex>
            </div>
        </PageFrame>
    }
}
