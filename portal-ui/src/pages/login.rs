//! Login Page

use leptos::*;
use leptos_router::*;

use localgov::auth;

use crate::api::GlooClient;
use crate::state::{GlobalState, LocalStorageStore};

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let (e, p) = (email.get(), password.get());
        let navigate = navigate.clone();
        set_submitting.set(true);

        spawn_local(async move {
            let api = GlooClient::from_storage();
            let result = auth::login(&api, &LocalStorageStore, &e, &p).await;
            set_submitting.set(false);

            match result {
                Ok(_) => navigate("/dashboard", Default::default()),
                Err(err) => state.show_error(&err.to_string()),
            }
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Resident Login"</h1>

                <label for="email">"Email"</label>
                <input
                    id="email"
                    type="email"
                    required
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />

                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    required
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>

                <p class="auth-switch">
                    "Don't have an account? "
                    <A href="/signup">"Sign up"</A>
                </p>
            </form>
        </div>
    }
}
