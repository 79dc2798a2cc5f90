//! Council branding at the top of each record card

use leptos::*;

use localgov::portal::details::CardHeader;

#[component]
pub fn CardHeaderView(header: CardHeader) -> impl IntoView {
    let CardHeader {
        logo_url,
        logo_alt,
        council,
        title,
    } = header;

    view! {
        <div class="card-header">
            {match logo_url {
                Some(url) => view! { <img class="card-logo" src=url alt=logo_alt /> }.into_view(),
                None => view! { <div class="card-logo placeholder">"🏛️"</div> }.into_view(),
            }}
            <div>
                <h3>{title}</h3>
                {council.map(|c| view! { <p class="card-council">{c}</p> })}
            </div>
        </div>
    }
}
