use super::super::view_model::WidgetEditorViewModel;
use super::{matrix2d, matrix2d_mut};
use crate::shared::components::ui::{Button, FieldError, Input};
use crate::shared::icons::icon;
use contracts::domain::a001_widget::items::Matrix2dSubItem;
use contracts::domain::a001_widget::properties::{
    Matrix2dProperties, MATRIX2D_COLUMNS_LIMIT, MATRIX2D_ROWS_LIMIT, MATRIX2D_SUB_COLUMNS_LIMIT,
    MATRIX2D_SUB_ROWS_LIMIT,
};
use contracts::domain::common::list_item::{find_item, find_item_mut};
use contracts::domain::common::ListItem;
use leptos::prelude::*;

/// Rows or columns of the grid
#[derive(Clone, Copy, PartialEq)]
enum Axis {
    Rows,
    Columns,
}

impl Axis {
    fn field(self) -> &'static str {
        match self {
            Axis::Rows => "rows",
            Axis::Columns => "columns",
        }
    }

    fn sub_field(self) -> &'static str {
        match self {
            Axis::Rows => "subRows",
            Axis::Columns => "subColumns",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Axis::Rows => "row",
            Axis::Columns => "column",
        }
    }

    fn limit(self) -> usize {
        match self {
            Axis::Rows => MATRIX2D_ROWS_LIMIT,
            Axis::Columns => MATRIX2D_COLUMNS_LIMIT,
        }
    }

    fn sub_limit(self) -> usize {
        match self {
            Axis::Rows => MATRIX2D_SUB_ROWS_LIMIT,
            Axis::Columns => MATRIX2D_SUB_COLUMNS_LIMIT,
        }
    }

    fn ids(self, p: &Matrix2dProperties) -> Vec<String> {
        match self {
            Axis::Rows => p.rows.iter().map(|r| r.item_key().to_string()).collect(),
            Axis::Columns => p.columns.iter().map(|c| c.item_key().to_string()).collect(),
        }
    }

    fn len(self, p: &Matrix2dProperties) -> usize {
        match self {
            Axis::Rows => p.rows.len(),
            Axis::Columns => p.columns.len(),
        }
    }

    fn subs(self, p: &Matrix2dProperties, parent: &str) -> Option<Vec<Matrix2dSubItem>> {
        match self {
            Axis::Rows => find_item(&p.rows, parent).map(|r| r.sub_rows.clone()),
            Axis::Columns => find_item(&p.columns, parent).map(|c| c.sub_columns.clone()),
        }
    }

    fn subs_mut<'a>(self, p: &'a mut Matrix2dProperties, parent: &str) -> Option<&'a mut Vec<Matrix2dSubItem>> {
        match self {
            Axis::Rows => p.row_mut(parent).map(|r| &mut r.sub_rows),
            Axis::Columns => p.column_mut(parent).map(|c| &mut c.sub_columns),
        }
    }

    /// (label, tooltip, color) of a row or column; columns have no color
    fn header(self, p: &Matrix2dProperties, id: &str) -> (String, String, String) {
        match self {
            Axis::Rows => find_item(&p.rows, id)
                .map(|r| (r.label.clone(), r.tooltip.clone().unwrap_or_default(), r.color.clone()))
                .unwrap_or_default(),
            Axis::Columns => find_item(&p.columns, id)
                .map(|c| (c.label.clone(), c.tooltip.clone().unwrap_or_default(), String::new()))
                .unwrap_or_default(),
        }
    }

    fn set_label(self, p: &mut Matrix2dProperties, id: &str, label: String) {
        match self {
            Axis::Rows => {
                if let Some(r) = p.row_mut(id) {
                    r.label = label;
                }
            }
            Axis::Columns => {
                if let Some(c) = p.column_mut(id) {
                    c.label = label;
                }
            }
        }
    }

    fn set_tooltip(self, p: &mut Matrix2dProperties, id: &str, tooltip: Option<String>) {
        match self {
            Axis::Rows => {
                if let Some(r) = p.row_mut(id) {
                    r.tooltip = tooltip;
                }
            }
            Axis::Columns => {
                if let Some(c) = p.column_mut(id) {
                    c.tooltip = tooltip;
                }
            }
        }
    }

    fn add(self, p: &mut Matrix2dProperties) {
        match self {
            Axis::Rows => p.add_row(),
            Axis::Columns => p.add_column(),
        };
    }

    fn remove(self, p: &mut Matrix2dProperties, id: &str) {
        match self {
            Axis::Rows => p.remove_row(id),
            Axis::Columns => p.remove_column(id),
        };
    }

    fn add_sub(self, p: &mut Matrix2dProperties, parent: &str) {
        match self {
            Axis::Rows => p.add_sub_row(parent),
            Axis::Columns => p.add_sub_column(parent),
        };
    }

    fn remove_sub(self, p: &mut Matrix2dProperties, parent: &str, sub: &str) {
        match self {
            Axis::Rows => p.remove_sub_row(parent, sub),
            Axis::Columns => p.remove_sub_column(parent, sub),
        };
    }
}

#[component]
fn SubItem(vm: WidgetEditorViewModel, axis: Axis, parent: String, sub: String) -> impl IntoView {
    let label = {
        let (parent, sub) = (parent.clone(), sub.clone());
        Signal::derive(move || {
            vm.read(matrix2d, |p| {
                axis.subs(p, &parent)
                    .and_then(|subs| find_item(&subs, &sub).map(|s| s.label.clone()))
                    .unwrap_or_default()
            })
        })
    };
    let error = {
        let (parent, sub) = (parent.clone(), sub.clone());
        Signal::derive(move || {
            vm.error(&["properties", axis.field(), &parent, axis.sub_field(), &sub, "label"])
        })
    };
    let (p1, s1) = (parent.clone(), sub.clone());

    view! {
        <div class="widget-editor__sub-item">
            <Input
                placeholder=format!("Sub-{} label", axis.noun())
                value=label
                on_input=Callback::new(move |text: String| {
                    vm.edit_props(matrix2d_mut, |p| {
                        if let Some(s) = axis.subs_mut(p, &p1).and_then(|subs| find_item_mut(subs, &s1)) {
                            s.label = text;
                        }
                    })
                })
                error=error
            />
            <Button
                variant="ghost"
                title=format!("Remove sub-{}", axis.noun())
                on_click=Callback::new(move |_| {
                    vm.edit_props(matrix2d_mut, |p| axis.remove_sub(p, &parent, &sub))
                })
            >
                {icon("delete")}
            </Button>
        </div>
    }
}

#[component]
fn AxisItem(vm: WidgetEditorViewModel, axis: Axis, id: String) -> impl IntoView {
    let header = {
        let id = id.clone();
        Memo::new(move |_| vm.read(matrix2d, |p| axis.header(p, &id)))
    };
    let error = {
        let id = id.clone();
        move |field: &'static str| {
            let id = id.clone();
            Signal::derive(move || vm.error(&["properties", axis.field(), &id, field]))
        }
    };
    let sub_ids = {
        let id = id.clone();
        move || {
            vm.read(matrix2d, |p| {
                axis.subs(p, &id)
                    .map(|subs| subs.iter().map(|s| s.item_key().to_string()).collect::<Vec<_>>())
                    .unwrap_or_default()
            })
        }
    };
    let subs_full = {
        let id = id.clone();
        Signal::derive(move || {
            vm.read(matrix2d, |p| axis.subs(p, &id).is_some_and(|s| s.len() >= axis.sub_limit()))
        })
    };
    let subs_error = {
        let id = id.clone();
        Signal::derive(move || {
            vm.non_field_errors(&["properties", axis.field(), &id, axis.sub_field()])
                .into_iter()
                .next()
        })
    };
    let (i1, i2, i3, i4, i5, i6) = (id.clone(), id.clone(), id.clone(), id.clone(), id.clone(), id.clone());

    let color = (axis == Axis::Rows).then(|| {
        view! {
            <Input
                input_type="color"
                class="widget-editor__color"
                value=Signal::derive(move || header.get().2)
                on_input=Callback::new(move |color: String| {
                    vm.edit_props(matrix2d_mut, |p| {
                        if let Some(r) = p.row_mut(&i1) {
                            r.color = color;
                        }
                    })
                })
                error=error("color")
            />
        }
    });

    view! {
        <div class="widget-editor__item widget-editor__item--nested">
            <div class="widget-editor__row">
                {color}
                <Input
                    placeholder=format!("{} label", axis.noun())
                    value=Signal::derive(move || header.get().0)
                    on_input=Callback::new(move |label: String| {
                        vm.edit_props(matrix2d_mut, |p| axis.set_label(p, &i2, label))
                    })
                    error=error("label")
                />
                <Input
                    placeholder="Tooltip"
                    value=Signal::derive(move || header.get().1)
                    on_input=Callback::new(move |tooltip: String| {
                        vm.edit_props(matrix2d_mut, |p| {
                            axis.set_tooltip(p, &i3, Some(tooltip).filter(|t| !t.is_empty()))
                        })
                    })
                />
                <Button
                    variant="ghost"
                    title=format!("Remove {}", axis.noun())
                    on_click=Callback::new(move |_| {
                        vm.edit_props(matrix2d_mut, |p| axis.remove(p, &i4))
                    })
                >
                    {icon("delete")}
                </Button>
            </div>
            <div class="widget-editor__sub-list">
                <For
                    each=sub_ids
                    key=|sub| sub.clone()
                    children=move |sub| view! { <SubItem vm=vm axis=axis parent=i5.clone() sub=sub /> }
                />
                <FieldError error=subs_error />
                <Button
                    variant="secondary"
                    size="sm"
                    disabled=subs_full
                    on_click=Callback::new(move |_| {
                        vm.edit_props(matrix2d_mut, |p| axis.add_sub(p, &i6))
                    })
                >
                    {icon("add")}
                    {format!("Add sub-{}", axis.noun())}
                </Button>
            </div>
        </div>
    }
}

#[component]
fn AxisList(vm: WidgetEditorViewModel, axis: Axis) -> impl IntoView {
    let ids = move || vm.read(matrix2d, |p| axis.ids(p));
    let full = Signal::derive(move || vm.read(matrix2d, |p| axis.len(p) >= axis.limit()));

    view! {
        <div class="widget-editor__axis">
            <h4>{match axis { Axis::Rows => "Rows", Axis::Columns => "Columns" }}</h4>
            <For
                each=ids
                key=|id| id.clone()
                children=move |id| view! { <AxisItem vm=vm axis=axis id=id /> }
            />
            <FieldError error=Signal::derive(move || {
                vm.non_field_errors(&["properties", axis.field()]).into_iter().next()
            }) />
            <Button
                variant="secondary"
                disabled=full
                on_click=Callback::new(move |_| vm.edit_props(matrix2d_mut, |p| axis.add(p)))
            >
                {icon("add")}
                {format!("Add {}", axis.noun())}
            </Button>
        </div>
    }
}

/// Rows with sub-rows and columns with sub-columns of a MATRIX2D widget
#[component]
pub fn Matrix2dSection(vm: WidgetEditorViewModel) -> impl IntoView {
    view! {
        <div class="widget-editor__section widget-editor__section--grid">
            <AxisList vm=vm axis=Axis::Rows />
            <AxisList vm=vm axis=Axis::Columns />
        </div>
    }
}
