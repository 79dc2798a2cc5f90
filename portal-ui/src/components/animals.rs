//! Animal Details
//!
//! Service picker with the adoption listing behind "Adopt An Animal".

use leptos::*;

use localgov::portal::details::animal_panel;
use localgov::portal::{AdoptableAnimal, AnimalAction};

#[component]
pub fn AnimalDetails(animals: Vec<AdoptableAnimal>) -> impl IntoView {
    let (selected, set_selected) = create_signal(None::<AnimalAction>);

    view! {
        <div class="service-grid">
            {AnimalAction::all().iter().copied().map(|action| view! {
                <button
                    class=move || if selected.get() == Some(action) { "service-card selected" } else { "service-card" }
                    on:click=move |_| set_selected.set(Some(action))
                >
                    <span class="service-icon">{action.icon()}</span>
                    <span>{action.label()}</span>
                </button>
            }).collect_view()}
        </div>

        {move || {
            let panel = animal_panel(&animals, selected.get());
            view! {
                {(!panel.listing.is_empty()).then(|| view! {
                    <h4>"Animals Available for Adoption"</h4>
                })}
                <div class="animal-grid">
                    {panel.listing.into_iter().map(|animal| view! {
                        <article class="animal-card">
                            {animal.photo.map(|src| view! {
                                <img class="animal-photo" src=src alt=animal.name.clone() />
                            })}
                            <h5>{animal.name.clone()}</h5>
                            {animal.lines.into_iter().map(|line| view! { <p>{line}</p> }).collect_view()}
                            {animal.temperament.map(|t| view! { <p class="muted">{t}</p> })}
                            <div class="gallery">
                                {animal.gallery.into_iter().map(|src| view! {
                                    <img class="gallery-thumb" src=src alt="" />
                                }).collect_view()}
                            </div>
                        </article>
                    }).collect_view()}
                </div>
                {panel.message.map(|message| view! { <p class="service-info">{message}</p> })}
            }
        }}
    }
}
