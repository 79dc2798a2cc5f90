//! Development Details

use leptos::*;

use localgov::portal::details::{self, ApplicationCard};

use super::{CardHeaderView, MiniMap};

#[component]
pub fn DevelopmentDetails(cards: Vec<ApplicationCard>) -> impl IntoView {
    if cards.is_empty() {
        return view! { <p class="empty">{details::NO_APPLICATIONS}</p> }.into_view();
    }

    cards
        .into_iter()
        .map(|card| {
            view! {
                <article class="record-card application-card">
                    <CardHeaderView header=card.header />
                    <dl class="facts">
                        {card.property.map(|p| view! { <dt>"Property"</dt><dd>{p}</dd> })}
                        <dt>"Status"</dt>
                        <dd><span class=card.status_class>{card.status}</span></dd>
                        {card.submitted.map(|d| view! { <dt>"Submitted"</dt><dd>{d}</dd> })}
                        {card.approved.map(|d| view! { <dt>"Approved"</dt><dd>{d}</dd> })}
                        {card.estimated_cost.map(|c| view! { <dt>"Estimated Cost"</dt><dd>{c}</dd> })}
                    </dl>
                    {card.description.map(|d| view! { <p class="description">{d}</p> })}
                    <ul class="documents">
                        {card.documents.into_iter().map(|(label, url)| view! {
                            <li><a href=url target="_blank" rel="noopener noreferrer">{label}</a></li>
                        }).collect_view()}
                    </ul>
                    <MiniMap plan=card.map />
                </article>
            }
        })
        .collect_view()
}
