//! Signup Page

use leptos::*;
use leptos_router::*;

use localgov::auth::{self, LOGIN_ROUTE};

use crate::api::GlooClient;
use crate::state::{GlobalState, LocalStorageStore};

#[component]
pub fn SignupPage() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let navigate = use_navigate();

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let (n, e, p) = (name.get(), email.get(), password.get());
        let navigate = navigate.clone();
        set_submitting.set(true);

        spawn_local(async move {
            let api = GlooClient::from_storage();
            let result = auth::register(&api, &LocalStorageStore, &n, &e, &p).await;
            set_submitting.set(false);

            match result {
                Ok(done) => {
                    state.show_success(&done.message);
                    // A token issued at signup goes straight to the dashboard
                    let next = if done.session.is_some() { "/dashboard" } else { LOGIN_ROUTE };
                    navigate(next, Default::default());
                }
                Err(err) => state.show_error(&err.to_string()),
            }
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Create Account"</h1>

                <label for="name">"Full Name"</label>
                <input
                    id="name"
                    type="text"
                    required
                    prop:value=name
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />

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
                    {move || if submitting.get() { "Creating account..." } else { "Sign Up" }}
                </button>

                <p class="auth-switch">
                    "Already have an account? "
                    <A href=LOGIN_ROUTE>"Log in"</A>
                </p>
            </form>
        </div>
    }
}
