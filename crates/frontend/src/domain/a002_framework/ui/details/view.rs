use super::view_model::FrameworkDetailsViewModel;
use crate::domain::a001_widget::ui::WidgetSlot;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::ui::{Badge, Button, Checkbox, Select};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a001_widget::{WidgetMode, WidgetRecord};
use contracts::enums::WidgetKind;
use leptos::prelude::*;
use thaw::{Card, Flex, FlexAlign, FlexGap, Spinner};

fn kind_label(record: &WidgetRecord) -> String {
    record
        .kind()
        .map(|k| k.display_name().to_string())
        .unwrap_or_else(|| record.widget_id.clone())
}

/// Collapsed widget in edit mode
#[component]
fn WidgetSummary(vm: FrameworkDetailsViewModel, record: WidgetRecord) -> impl IntoView {
    let id = record.client_id.clone();
    let title = {
        let id = id.clone();
        move || {
            vm.framework.with(|f| {
                f.widgets
                    .iter()
                    .find(|r| r.client_id == id)
                    .map(|r| r.title.clone())
                    .unwrap_or_default()
            })
        }
    };
    let conditional = record.conditional.is_some();
    let (i1, i2, i3, i4) = (id.clone(), id.clone(), id.clone(), id);

    view! {
        <Flex class="widget-summary" align=FlexAlign::Center gap=FlexGap::Small>
            <Badge variant="kind">{kind_label(&record)}</Badge>
            <span class="widget-summary__title">{title}</span>
            {conditional.then(|| view! { <Badge>"Conditional"</Badge> })}
            <Flex class="widget-summary__actions" gap=FlexGap::Small>
                <Button variant="ghost" title="Edit" on_click=Callback::new(move |_| vm.edit_command(i1.clone()))>
                    {icon("edit")}
                </Button>
                <Button variant="ghost" title="Move up" disabled=vm.saving on_click=Callback::new(move |_| vm.move_command(i2.clone(), -1))>
                    {icon("arrow-up")}
                </Button>
                <Button variant="ghost" title="Move down" disabled=vm.saving on_click=Callback::new(move |_| vm.move_command(i3.clone(), 1))>
                    {icon("arrow-down")}
                </Button>
                <Button variant="danger" title="Delete" disabled=vm.saving on_click=Callback::new(move |_| vm.remove_command(i4.clone()))>
                    {icon("delete")}
                </Button>
            </Flex>
        </Flex>
    }
}

fn edit_mode(vm: FrameworkDetailsViewModel) -> AnyView {
    let kinds = Signal::derive(|| {
        WidgetKind::all()
            .into_iter()
            .map(|k| (k.code().to_string(), k.display_name().to_string()))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="framework-editor">
            <Flex class="framework-editor__add" align=FlexAlign::End gap=FlexGap::Small>
                <Select
                    label="New widget"
                    options=kinds
                    value=vm.new_kind
                    on_change=Callback::new(move |code: String| vm.new_kind.set(code))
                />
                <Button
                    variant="primary"
                    disabled=Signal::derive(move || vm.editing.get().is_some())
                    on_click=Callback::new(move |_| vm.add_widget_command())
                >
                    {icon("add")}
                    "Add widget"
                </Button>
            </Flex>
            <For
                each=move || vm.records()
                key=|record| record.client_id.clone()
                children=move |record| {
                    let id = record.client_id.clone();
                    let is_open = Memo::new(move |_| vm.editing.get().as_deref() == Some(id.as_str()));
                    let record_id = record.client_id.clone();
                    let width = record.width.code();
                    view! {
                        <div class="framework-editor__item" data-width=width>
                            <Card>
                            {move || {
                                if is_open.get() {
                                    let current = vm.record(&record_id).unwrap_or_else(|| record.clone());
                                    view! {
                                        <WidgetSlot
                                            record=current
                                            mode=WidgetMode::Edit
                                            value=Signal::derive_local(|| None)
                                            on_value_change=Callback::new(|_| {})
                                            on_widget_change=Callback::new(move |w| vm.widget_changed(w))
                                            on_widget_save=Callback::new(move |w| vm.widget_saved(w))
                                            on_widget_cancel=Callback::new(move |_| vm.cancel_command())
                                            parents=vm.parent_candidates(&record_id)
                                        />
                                    }
                                    .into_any()
                                } else {
                                    view! { <WidgetSummary vm=vm record=record.clone() /> }.into_any()
                                }
                            }}
                            </Card>
                        </div>
                    }
                }
            />
        </div>
    }
    .into_any()
}

fn view_mode(vm: FrameworkDetailsViewModel) -> AnyView {
    let geo = vm.geo.options();

    view! {
        <div class="framework-entry">
            <Flex class="framework-entry__toolbar" align=FlexAlign::Center gap=FlexGap::Large>
                <Checkbox
                    label="Read-only"
                    checked=vm.read_only
                    on_change=Callback::new(move |on: bool| vm.read_only.set(on))
                />
                <Button
                    variant="primary"
                    disabled=Signal::derive(move || vm.saving.get() || !vm.entry_dirty.get())
                    on_click=Callback::new(move |_| vm.save_entry_command())
                >
                    {icon("save")}
                    "Save entry"
                </Button>
                <Show when=move || vm.saving.get()>
                    <Spinner />
                </Show>
            </Flex>
            {move || {
                let orphans = vm.orphan_count();
                (orphans > 0).then(|| view! {
                    <div class="warning">
                        {format!("{} value(s) belong to widgets that were removed from this framework.", orphans)}
                    </div>
                })
            }}
            <div class="framework-entry__widgets">
                <For
                    each=move || vm.records()
                    key=|record| (record.client_id.clone(), record.version, record.properties.clone().map(|p| p.to_string()))
                    children=move |record| {
                        let value = match record.resolve() {
                            Some(widget) => vm.value_signal(widget),
                            None => Signal::derive_local(|| None),
                        };
                        let width = record.width.code();
                        let id = record.client_id.clone();
                        view! {
                            <div class="framework-entry__item" data-width=width>
                                {move || vm.is_visible(&id).then(|| view! {
                                    <WidgetSlot
                                        record=record.clone()
                                        mode=WidgetMode::View
                                        value=value
                                        on_value_change=Callback::new(move |(v, name)| vm.value_changed(v, name))
                                        on_widget_change=Callback::new(|_| {})
                                        on_widget_save=Callback::new(|_| {})
                                        on_widget_cancel=Callback::new(|_| {})
                                        disabled=vm.saving
                                        read_only=vm.read_only.get()
                                        geo=Some(geo)
                                    />
                                })}
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
    .into_any()
}

#[component]
pub fn FrameworkDetails(#[prop(into)] id: Signal<Option<String>>, vm: FrameworkDetailsViewModel) -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    Effect::new(move |_| {
        if let Some(id) = id.get() {
            vm.load(id);
        }
    });

    view! {
        <PageFrame page_id="a002_framework--detail" category=PAGE_CAT_DETAIL>
            <div class="details-header">
                <h3>{move || vm.framework.with(|f| f.title.clone())}</h3>
                {move || vm.framework.with(|f| f.description.clone()).map(|d| view! { <p>{d}</p> })}
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <Show when=move || vm.loading.get()>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Spinner />
                    <span>"Loading..."</span>
                </Flex>
            </Show>

            {move || {
                let hidden = vm.unknown_count();
                (hidden > 0).then(|| view! {
                    <div class="info">{format!("{} widget(s) of unsupported kinds are hidden.", hidden)}</div>
                })
            }}

            {move || match ctx.mode.get() {
                WidgetMode::Edit => edit_mode(vm),
                WidgetMode::View => view_mode(vm),
            }}
        </PageFrame>
    }
}
