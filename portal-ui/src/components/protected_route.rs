//! Protected Route
//!
//! Renders its children only for a signed-in resident with a live token.

use leptos::*;
use leptos_router::*;

use localgov::auth::{Access, DenyReason, RouteGuard, LOGIN_ROUTE};

use crate::state::{GlobalState, LocalStorageStore};

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    move || match RouteGuard::check(&LocalStorageStore, chrono::Utc::now()) {
        Access::Granted { .. } => children().into_view(),
        Access::Denied(reason) => {
            if reason != DenyReason::NoToken {
                state.show_error(reason.message());
            }
            view! { <Redirect path=LOGIN_ROUTE /> }.into_view()
        }
    }
}
