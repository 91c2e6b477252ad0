//! TopHeader: framework title, edit/view switch and the tagging panel toggle.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use contracts::domain::a001_widget::WidgetMode;
use leptos::prelude::*;

#[component]
pub fn TopHeader(#[prop(into)] title: Signal<String>) -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let is_edit = move || ctx.mode.get() == WidgetMode::Edit;

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">{move || title.get()}</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    class:top-header__icon-btn--active=is_edit
                    on:click=move |_| ctx.toggle_mode()
                    title=move || if is_edit() { "Switch to entry view" } else { "Edit framework" }
                >
                    {move || if is_edit() { icon("cancel") } else { icon("edit") }}
                </button>
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_right()
                    title=move || if ctx.right_open.get() { "Hide tag mapping" } else { "Show tag mapping" }
                >
                    {move || if ctx.right_open.get() { icon("chevron-right") } else { icon("chevron-down") }}
                </button>
            </div>
        </div>
    }
}
