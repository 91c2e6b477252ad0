use crate::domain::a002_framework::ui::details::{FrameworkDetails, FrameworkDetailsViewModel};
use crate::domain::a003_mapping::ui::tagging::{TaggingPanel, TaggingViewModel};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppGlobalContext::new();
    provide_context(ctx);
    ctx.init_url_sync();

    let framework = FrameworkDetailsViewModel::new();
    let tagging = TaggingViewModel::new();

    let title = Signal::derive(move || {
        let title = framework.framework.with(|f| f.title.clone());
        if title.is_empty() {
            "Analysis framework".to_string()
        } else {
            title
        }
    });
    let widgets = Signal::derive(move || framework.framework.with(|f| f.widgets()));
    // Mappings follow the stored framework id, not the one requested in the URL
    let stored_id = Signal::derive(move || framework.framework.with(|f| f.id.clone()));

    view! {
        <Shell
            title=title
            center=move || view! { <FrameworkDetails id=ctx.framework_id vm=framework /> }.into_any()
            right=move || view! { <TaggingPanel vm=tagging widgets=widgets framework_id=stored_id /> }.into_any()
        />
    }
}
