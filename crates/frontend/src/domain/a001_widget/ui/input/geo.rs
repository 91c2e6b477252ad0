use crate::shared::components::ui::{Button, Input};
use crate::shared::icons::icon;
use contracts::domain::a001_widget::input::toggle_key;
use contracts::domain::a001_widget::{GeoArea, GeoAreaLookup, WidgetValue};
use leptos::prelude::*;

/// Geo area source supplied by the owning screen
#[derive(Clone, Copy)]
pub struct GeoOptions {
    /// Areas known so far by id, used to label selected ids
    pub lookup: Signal<GeoAreaLookup>,
    /// Results of the current search
    pub results: Signal<Vec<GeoArea>>,
    pub has_more: Signal<bool>,
    pub pending: Signal<bool>,
    pub on_search: Callback<String>,
    pub on_load_more: Callback<()>,
}

#[component]
pub fn GeoInput(
    value: Signal<Option<WidgetValue>, LocalStorage>,
    emit: Callback<Option<WidgetValue>>,
    disabled: Signal<bool>,
    geo: GeoOptions,
) -> impl IntoView {
    let search = RwSignal::new(String::new());
    let selected = move || {
        value.with(|v| match v {
            Some(WidgetValue::Geo(ids)) => ids.clone(),
            _ => Vec::new(),
        })
    };
    let toggle = move |id: String| {
        let next = toggle_key(Some(selected().as_slice()), &id);
        emit.run((!next.is_empty()).then_some(WidgetValue::Geo(next)));
    };

    view! {
        <div class="geo-input">
            <div class="geo-input__selected">
                <For
                    each=selected
                    key=|id| id.clone()
                    children=move |id| {
                        let label = {
                            let id = id.clone();
                            move || {
                                geo.lookup
                                    .with(|areas| areas.get(&id).map(GeoArea::display_label))
                                    .unwrap_or_else(|| id.clone())
                            }
                        };
                        view! {
                            <span class="geo-input__chip">
                                {label}
                                <button
                                    class="geo-input__chip-remove"
                                    title="Remove"
                                    disabled=move || disabled.get()
                                    on:click=move |_| toggle(id.clone())
                                >
                                    {icon("cancel")}
                                </button>
                            </span>
                        }
                    }
                />
            </div>

            <Input
                placeholder="Search geo areas"
                value=search
                disabled=disabled
                on_input=Callback::new(move |text: String| {
                    search.set(text.clone());
                    geo.on_search.run(text);
                })
            />

            <ul class="geo-input__results">
                <For
                    each=move || geo.results.get()
                    key=|area| area.id.clone()
                    children=move |area| {
                        let id = area.id.clone();
                        let checked = {
                            let id = id.clone();
                            move || selected().contains(&id)
                        };
                        view! {
                            <li>
                                <label title=area.region_title.clone().unwrap_or_default()>
                                    <input
                                        type="checkbox"
                                        prop:checked=checked
                                        disabled=move || disabled.get()
                                        on:change=move |_| toggle(id.clone())
                                    />
                                    {area.display_label()}
                                </label>
                            </li>
                        }
                    }
                />
            </ul>

            {move || geo.pending.get().then(|| view! { <div class="geo-input__loading">"Loading..."</div> })}
            <Show when=move || geo.has_more.get() && !geo.pending.get()>
                <Button variant="ghost" on_click=Callback::new(move |_| geo.on_load_more.run(()))>
                    "Load more"
                </Button>
            </Show>
        </div>
    }
}
