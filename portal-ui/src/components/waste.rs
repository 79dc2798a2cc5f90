//! Waste Details
//!
//! Collection kinds with the next pickup and, for garbage, the truck route.

use leptos::*;

use localgov::portal::details::waste_panel;
use localgov::portal::{WasteKind, WasteSchedule};

use super::MiniMap;

#[component]
pub fn WasteDetails(schedule: WasteSchedule) -> impl IntoView {
    let (selected, set_selected) = create_signal(WasteKind::Garbage);

    view! {
        <div class="service-grid">
            {WasteKind::all().iter().copied().map(|kind| view! {
                <button
                    class=move || if selected.get() == kind { "service-card selected" } else { "service-card" }
                    on:click=move |_| set_selected.set(kind)
                >
                    <span class="service-icon">{kind.icon()}</span>
                    <span>{kind.label()}</span>
                </button>
            }).collect_view()}
        </div>

        {move || {
            let panel = waste_panel(&schedule, selected.get());
            view! {
                <section class="waste-panel">
                    <h4>{panel.heading}</h4>
                    {panel.collection.map(|c| view! {
                        <p class="next-collection">{c.next_collection}</p>
                        {c.notes.map(|notes| view! { <p class="muted">{notes}</p> })}
                        {c.route.map(|route| view! { <MiniMap plan=route class="route-map" /> })}
                        {c.hint.map(|hint| view! { <p class="service-info">{hint}</p> })}
                    })}
                    {panel.empty_message.map(|message| view! { <p class="muted">{message}</p> })}
                </section>
            }
        }}
    }
}
