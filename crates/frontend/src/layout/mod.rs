pub mod global_context;
pub mod top_header;

use leptos::prelude::*;
use global_context::AppGlobalContext;
use top_header::TopHeader;

/// Application shell.
///
/// ```text
/// +------------------------------------+
/// |             TopHeader              |
/// +------------------------------------+
/// |      Content      |  RightPanel    |
/// +------------------------------------+
/// ```
#[component]
pub fn Shell<C, R>(#[prop(into)] title: Signal<String>, center: C, right: R) -> impl IntoView
where
    C: Fn() -> AnyView + 'static + Send,
    R: Fn() -> AnyView + 'static + Send,
{
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-layout">
            <TopHeader title=title />
            <div class="app-body">
                <div class="app-main">{center()}</div>
                <div
                    data-zone="right"
                    class="right-panel"
                    class:right-panel--hidden=move || !ctx.right_open.get()
                >
                    {right()}
                </div>
            </div>
        </div>
    }
}
