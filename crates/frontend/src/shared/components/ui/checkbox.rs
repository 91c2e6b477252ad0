use leptos::prelude::*;

#[component]
pub fn Checkbox(
    #[prop(into)] label: Signal<String>,
    #[prop(into)] checked: Signal<bool>,
    #[prop(optional)] on_change: Option<Callback<bool>>,
    #[prop(optional, into)] disabled: Signal<bool>,
    /// Tooltip of the wrapper
    #[prop(optional, into)]
    title: MaybeProp<String>,
    #[prop(optional, into)] class: MaybeProp<String>,
) -> impl IntoView {
    let wrapper_class = move || {
        let state = if disabled.get() { "form__checkbox-wrapper--disabled" } else { "" };
        format!("form__checkbox-wrapper {} {}", state, class.get().unwrap_or_default())
    };

    view! {
        <label class=wrapper_class title=move || title.get().unwrap_or_default()>
            <input
                type="checkbox"
                class="form__checkbox"
                prop:checked=move || checked.get()
                disabled=move || disabled.get()
                on:change=move |ev| {
                    if let Some(handler) = on_change {
                        handler.run(event_target_checked(&ev));
                    }
                }
            />
            <span class="form__checkbox-label">{label}</span>
        </label>
    }
}
