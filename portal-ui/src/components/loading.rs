//! Loading Component
//!
//! Loading spinner and the error view with its Retry button and sign-in
//! link.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading(
    #[prop(default = "Loading...")]
    message: &'static str,
) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="loading-spinner" />
            <p>{message}</p>
        </div>
    }
}

/// Error message with a manual retry. `on_relogin` adds a link that
/// drops the session and starts over at the login page.
#[component]
pub fn ErrorView(
    #[prop(into)]
    message: String,
    on_retry: Callback<()>,
    #[prop(optional)]
    on_relogin: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="error-view">
            <h2>"Error Loading Dashboard"</h2>
            <p class="error-text">{message}</p>
            <button class="btn btn-primary" on:click=move |_| on_retry.call(())>
                "Retry"
            </button>
            {on_relogin.map(|relogin| view! {
                <p class="error-hint">
                    "If the problem persists, please "
                    <a href="#" class="link" on:click=move |ev| {
                        ev.prevent_default();
                        relogin.call(());
                    }>
                        "log in again"
                    </a>
                    "."
                </p>
            })}
        </div>
    }
}
