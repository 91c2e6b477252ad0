use super::super::view_model::WidgetEditorViewModel;
use super::{matrix1d, matrix1d_mut};
use crate::shared::components::ui::{Button, FieldError, Input};
use crate::shared::icons::icon;
use contracts::domain::a001_widget::items::{Matrix1dCell, Matrix1dRow};
use contracts::domain::a001_widget::properties::{MATRIX1D_CELLS_LIMIT, MATRIX1D_ROWS_LIMIT};
use contracts::domain::common::list_item::find_item;
use contracts::domain::common::ListItem;
use leptos::prelude::*;

fn row_signal(vm: WidgetEditorViewModel, row: String, f: fn(&Matrix1dRow) -> String) -> Signal<String> {
    Signal::derive(move || {
        vm.read(matrix1d, |p| find_item(&p.rows, &row).map(f).unwrap_or_default())
    })
}

fn cell_signal(vm: WidgetEditorViewModel, row: String, cell: String, f: fn(&Matrix1dCell) -> String) -> Signal<String> {
    Signal::derive(move || {
        vm.read(matrix1d, |p| {
            find_item(&p.rows, &row)
                .and_then(|r| find_item(&r.cells, &cell))
                .map(f)
                .unwrap_or_default()
        })
    })
}

/// Rows of a MATRIX1D widget, each with its cells
#[component]
pub fn Matrix1dSection(vm: WidgetEditorViewModel) -> impl IntoView {
    let row_ids = move || vm.read(matrix1d, |p| p.rows.iter().map(|r| r.item_key().to_string()).collect::<Vec<_>>());
    let rows_full = Signal::derive(move || vm.read(matrix1d, |p| p.rows.len() >= MATRIX1D_ROWS_LIMIT));

    let row_view = move |row: String| {
        let cell_ids = {
            let row = row.clone();
            move || {
                vm.read(matrix1d, |p| {
                    find_item(&p.rows, &row)
                        .map(|r| r.cells.iter().map(|c| c.item_key().to_string()).collect::<Vec<_>>())
                        .unwrap_or_default()
                })
            }
        };
        let cells_full = {
            let row = row.clone();
            Signal::derive(move || {
                vm.read(matrix1d, |p| {
                    find_item(&p.rows, &row).is_some_and(|r| r.cells.len() >= MATRIX1D_CELLS_LIMIT)
                })
            })
        };
        let error = {
            let row = row.clone();
            move |field: &'static str| {
                let row = row.clone();
                Signal::derive(move || vm.error(&["properties", "rows", &row, field]))
            }
        };
        let cells_error = {
            let row = row.clone();
            Signal::derive(move || vm.non_field_errors(&["properties", "rows", &row, "cells"]).into_iter().next())
        };

        let cell_view = {
            let row = row.clone();
            move |cell: String| {
                let (r1, c1) = (row.clone(), cell.clone());
                let (r2, c2) = (row.clone(), cell.clone());
                let error = {
                    let (row, cell) = (row.clone(), cell.clone());
                    Signal::derive(move || vm.error(&["properties", "rows", &row, "cells", &cell, "label"]))
                };
                view! {
                    <div class="widget-editor__sub-item">
                        <Input
                            placeholder="Cell label"
                            value=cell_signal(vm, row.clone(), cell.clone(), |c| c.label.clone())
                            on_input=Callback::new(move |label: String| {
                                vm.edit_props(matrix1d_mut, |p| {
                                    if let Some(c) = p.cell_mut(&r1, &c1) {
                                        c.label = label;
                                    }
                                })
                            })
                            error=error
                        />
                        <Button
                            variant="ghost"
                            title="Remove cell"
                            on_click=Callback::new(move |_| {
                                vm.edit_props(matrix1d_mut, |p| {
                                    p.remove_cell(&r2, &c2);
                                })
                            })
                        >
                            {icon("delete")}
                        </Button>
                    </div>
                }
            }
        };

        let (r1, r2, r3, r4, r5, r6, r7) = (
            row.clone(),
            row.clone(),
            row.clone(),
            row.clone(),
            row.clone(),
            row.clone(),
            row.clone(),
        );
        let move_row = move |row: String, delta: isize| {
            vm.edit_props(matrix1d_mut, |p| {
                if let Some(index) = p.rows.iter().position(|r| r.item_key() == row) {
                    let to = index as isize + delta;
                    if to >= 0 {
                        p.move_row(index, to as usize);
                    }
                }
            })
        };

        view! {
            <div class="widget-editor__item widget-editor__item--nested">
                <div class="widget-editor__row">
                    <Input
                        input_type="color"
                        class="widget-editor__color"
                        value=row_signal(vm, row.clone(), |r| r.color.clone())
                        on_input=Callback::new(move |color: String| {
                            vm.edit_props(matrix1d_mut, |p| {
                                if let Some(r) = p.row_mut(&r1) {
                                    r.color = color;
                                }
                            })
                        })
                        error=error("color")
                    />
                    <Input
                        placeholder="Row label"
                        value=row_signal(vm, row.clone(), |r| r.label.clone())
                        on_input=Callback::new(move |label: String| {
                            vm.edit_props(matrix1d_mut, |p| {
                                if let Some(r) = p.row_mut(&r2) {
                                    r.label = label;
                                }
                            })
                        })
                        error=error("label")
                    />
                    <Input
                        placeholder="Tooltip"
                        value=row_signal(vm, row.clone(), |r| r.tooltip.clone().unwrap_or_default())
                        on_input=Callback::new(move |tooltip: String| {
                            vm.edit_props(matrix1d_mut, |p| {
                                if let Some(r) = p.row_mut(&r3) {
                                    r.tooltip = Some(tooltip).filter(|t| !t.is_empty());
                                }
                            })
                        })
                    />
                    <Button variant="ghost" title="Move up" on_click=Callback::new(move |_| move_row(r4.clone(), -1))>
                        {icon("arrow-up")}
                    </Button>
                    <Button variant="ghost" title="Move down" on_click=Callback::new(move |_| move_row(r5.clone(), 1))>
                        {icon("arrow-down")}
                    </Button>
                    <Button
                        variant="ghost"
                        title="Remove row"
                        on_click=Callback::new(move |_| {
                            vm.edit_props(matrix1d_mut, |p| {
                                p.remove_row(&r6);
                            })
                        })
                    >
                        {icon("delete")}
                    </Button>
                </div>
                <div class="widget-editor__sub-list">
                    <For each=cell_ids key=|cell| cell.clone() children=cell_view />
                    <FieldError error=cells_error />
                    <Button
                        variant="secondary"
                        size="sm"
                        disabled=cells_full
                        on_click=Callback::new(move |_| {
                            vm.edit_props(matrix1d_mut, |p| {
                                p.add_cell(&r7);
                            })
                        })
                    >
                        {icon("add")}
                        "Add cell"
                    </Button>
                </div>
            </div>
        }
    };

    view! {
        <div class="widget-editor__section">
            <h4>"Rows"</h4>
            <For each=row_ids key=|row| row.clone() children=row_view />
            <FieldError error=Signal::derive(move || vm.non_field_errors(&["properties", "rows"]).into_iter().next()) />
            <Button
                variant="secondary"
                disabled=rows_full
                on_click=Callback::new(move |_| {
                    vm.edit_props(matrix1d_mut, |p| {
                        p.add_row();
                    })
                })
            >
                {icon("add")}
                "Add row"
            </Button>
        </div>
    }
}
