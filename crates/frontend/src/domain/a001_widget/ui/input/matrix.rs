use contracts::domain::a001_widget::input::{
    is_matrix1d_cell_selected, matrix2d_selection, set_matrix2d_column, toggle_matrix1d_cell,
    toggle_matrix2d_sub_column,
};
use contracts::domain::a001_widget::value::{Matrix1dValue, Matrix2dValue};
use contracts::domain::a001_widget::{Widget, WidgetProperties, WidgetValue};
use contracts::domain::common::list_item::sort_by_order;
use leptos::prelude::*;

fn matrix1d_of(value: &Option<WidgetValue>) -> Option<&Matrix1dValue> {
    match value {
        Some(WidgetValue::Matrix1d(v)) => Some(v),
        _ => None,
    }
}

fn matrix2d_of(value: &Option<WidgetValue>) -> Option<&Matrix2dValue> {
    match value {
        Some(WidgetValue::Matrix2d(v)) => Some(v),
        _ => None,
    }
}

/// Rows of toggle cells. Clicking a selected cell sets it to `false`.
#[component]
pub fn Matrix1dInput(
    widget: Widget,
    value: Signal<Option<WidgetValue>, LocalStorage>,
    emit: Callback<Option<WidgetValue>>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let rows = match &widget.properties {
        WidgetProperties::Matrix1d(p) => sort_by_order(&p.rows),
        _ => Vec::new(),
    };

    view! {
        <div class="matrix1d-input">
            {rows
                .into_iter()
                .map(|row| {
                    let cells = sort_by_order(&row.cells);
                    let row_key = row.key.clone();
                    view! {
                        <div class="matrix1d-input__row" style=format!("--row-color: {}", row.color)>
                            <div class="matrix1d-input__row-title" title=row.tooltip.clone().unwrap_or_default()>
                                {row.label.clone()}
                            </div>
                            <div class="matrix1d-input__cells">
                                {cells
                                    .into_iter()
                                    .map(|cell| {
                                        let (row_key, cell_key) = (row_key.clone(), cell.key.clone());
                                        let selected = {
                                            let (row_key, cell_key) = (row_key.clone(), cell_key.clone());
                                            move || value.with(|v| is_matrix1d_cell_selected(matrix1d_of(v), &row_key, &cell_key))
                                        };
                                        view! {
                                            <button
                                                class="matrix1d-input__cell"
                                                class:matrix1d-input__cell--selected=selected
                                                title=cell.tooltip.clone().unwrap_or_default()
                                                disabled=move || disabled.get()
                                                on:click=move |_| {
                                                    let next = value.with(|v| toggle_matrix1d_cell(matrix1d_of(v), &row_key, &cell_key));
                                                    emit.run(Some(WidgetValue::Matrix1d(next)));
                                                }
                                            >
                                                {cell.label}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Sub-rows against columns: a column checkbox plus sub-column chips per cell
#[component]
pub fn Matrix2dInput(
    widget: Widget,
    value: Signal<Option<WidgetValue>, LocalStorage>,
    emit: Callback<Option<WidgetValue>>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let (rows, columns) = match &widget.properties {
        WidgetProperties::Matrix2d(p) => (sort_by_order(&p.rows), sort_by_order(&p.columns)),
        _ => (Vec::new(), Vec::new()),
    };

    let header = columns
        .iter()
        .map(|column| {
            view! {
                <th title=column.tooltip.clone().unwrap_or_default()>{column.label.clone()}</th>
            }
        })
        .collect_view();

    let body = rows
        .into_iter()
        .flat_map(|row| {
            let columns = columns.clone();
            sort_by_order(&row.sub_rows).into_iter().map(move |sub_row| {
                let cells = columns
                    .iter()
                    .map(|column| {
                        let keys = (row.key.clone(), sub_row.key.clone(), column.key.clone());
                        let column_selected = {
                            let (r, s, c) = keys.clone();
                            move || {
                                value.with(|v| {
                                    matrix2d_selection(matrix2d_of(v), &r, &s).is_some_and(|sel| sel.contains_key(&c))
                                })
                            }
                        };
                        let toggle_column = {
                            let (r, s, c) = keys.clone();
                            let column_selected = column_selected.clone();
                            move |_: leptos::ev::Event| {
                                let on = !column_selected();
                                let next = value.with(|v| set_matrix2d_column(matrix2d_of(v), &r, &s, &c, on));
                                emit.run(Some(WidgetValue::Matrix2d(next)));
                            }
                        };
                        let chips = sort_by_order(&column.sub_columns)
                            .into_iter()
                            .map(|sub_column| {
                                let (r, s, c) = keys.clone();
                                let sc = sub_column.key.clone();
                                let chosen = {
                                    let (r, s, c, sc) = (r.clone(), s.clone(), c.clone(), sc.clone());
                                    move || {
                                        value.with(|v| {
                                            matrix2d_selection(matrix2d_of(v), &r, &s)
                                                .and_then(|sel| sel.get(&c))
                                                .is_some_and(|subs| subs.contains(&sc))
                                        })
                                    }
                                };
                                view! {
                                    <button
                                        class="matrix2d-input__chip"
                                        class:matrix2d-input__chip--selected=chosen
                                        disabled=move || disabled.get()
                                        on:click=move |_| {
                                            let next = value.with(|v| toggle_matrix2d_sub_column(matrix2d_of(v), &r, &s, &c, &sc));
                                            emit.run(Some(WidgetValue::Matrix2d(next)));
                                        }
                                    >
                                        {sub_column.label}
                                    </button>
                                }
                            })
                            .collect_view();
                        view! {
                            <td class="matrix2d-input__cell">
                                <input
                                    type="checkbox"
                                    prop:checked=column_selected
                                    disabled=move || disabled.get()
                                    on:change=toggle_column
                                />
                                <div class="matrix2d-input__chips">{chips}</div>
                            </td>
                        }
                    })
                    .collect_view();
                view! {
                    <tr style=format!("--row-color: {}", row.color)>
                        <th class="matrix2d-input__row" title=row.tooltip.clone().unwrap_or_default()>
                            {row.label.clone()}
                        </th>
                        <th class="matrix2d-input__sub-row" title=sub_row.tooltip.clone().unwrap_or_default()>
                            {sub_row.label.clone()}
                        </th>
                        {cells}
                    </tr>
                }
            })
        })
        .collect_view();

    view! {
        <table class="matrix2d-input">
            <thead>
                <tr>
                    <th></th>
                    <th></th>
                    {header}
                </tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}
