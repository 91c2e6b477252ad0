//! PageFrame: root wrapper of every page.
//!
//! Sets `id` (`"{entity}--{category}"`, e.g. `"a002_framework--detail"`) and
//! `data-page-category` on the root element.

use leptos::prelude::*;

pub const PAGE_CAT_DETAIL: &str = "detail";
pub const PAGE_CAT_PANEL: &str = "panel";

#[component]
pub fn PageFrame(
    page_id: &'static str,
    /// PAGE_CAT_DETAIL or PAGE_CAT_PANEL
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_PANEL => "page page--panel",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
