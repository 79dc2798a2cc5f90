//! App Root Component
//!
//! Routing and global providers.

use leptos::*;
use leptos_router::*;

use localgov::auth::LOGIN_ROUTE;

use crate::components::{ProtectedRoute, Toast};
use crate::pages::{DashboardPage, LoginPage, SignupPage};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <main class="app">
                <Routes>
                    <Route path=LOGIN_ROUTE view=LoginPage />
                    <Route path="/signup" view=SignupPage />
                    <Route
                        path="/dashboard"
                        view=|| view! {
                            <ProtectedRoute>
                                <DashboardPage />
                            </ProtectedRoute>
                        }
                    />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>

            // Toast notifications
            <Toast />
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <div class="not-found-icon">"🔍"</div>
            <h1>"Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist."</p>
            <A href=LOGIN_ROUTE class="btn btn-primary">
                "Go to Login"
            </A>
        </div>
    }
}
