//! Portal Header
//!
//! Council logo, welcome line and the Logout button.

use leptos::*;

use localgov::dashboard::Header;

#[component]
pub fn PortalHeader(
    #[prop(into)]
    header: Signal<Header>,
    on_logout: Callback<()>,
) -> impl IntoView {
    view! {
        <header class="portal-header">
            <div class="portal-brand">
                {move || {
                    let header = header.get();
                    match header.council_logo_url.clone() {
                        Some(url) => view! {
                            <img class="council-logo" src=url alt=header.logo_alt() />
                        }.into_view(),
                        None => view! {
                            <div class="council-logo placeholder">"🏛️"</div>
                        }.into_view(),
                    }
                }}
                <div>
                    <h1>{move || header.get().welcome()}</h1>
                    {move || header.get().council_name.map(|name| view! {
                        <p class="council-name">{name}</p>
                    })}
                </div>
            </div>
            <button class="btn btn-outline" on:click=move |_| on_logout.call(())>
                "Logout"
            </button>
        </header>
    }
}
