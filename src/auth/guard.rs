//! Route protection
//!
//! Pages behind the guard need a stored token that still decodes and has
//! not passed its `exp`. A token that fails either check is wiped so the
//! next visit starts clean.

use chrono::{DateTime, Utc};

use super::session::{Session, SessionStore};
use super::token::{TokenClaims, TokenStatus};

/// Where the guard sends signed-out visitors
pub const LOGIN_ROUTE: &str = "/";

/// Why access was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NoToken,
    Malformed,
    Expired,
    /// The session store itself could not be read
    StoreUnavailable,
}

impl DenyReason {
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::NoToken => "Please log in to continue.",
            DenyReason::Malformed | DenyReason::Expired => {
                "Your session has expired or is invalid. Please log in again."
            }
            DenyReason::StoreUnavailable => "Could not read the saved session.",
        }
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    Granted {
        session: Session,
        claims: TokenClaims,
    },
    Denied(DenyReason),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted { .. })
    }
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn check(store: &dyn SessionStore, now: DateTime<Utc>) -> Access {
        let session = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Session store unreadable");
                return Access::Denied(DenyReason::StoreUnavailable);
            }
        };

        let reason = match TokenStatus::of(session.token.as_deref(), now) {
            TokenStatus::Valid(claims) => return Access::Granted { session, claims },
            TokenStatus::Missing => return Access::Denied(DenyReason::NoToken),
            TokenStatus::Malformed(e) => {
                tracing::warn!(error = %e, "Discarding unreadable token");
                DenyReason::Malformed
            }
            TokenStatus::Expired(claims) => {
                tracing::info!(expired_at = ?claims.expires_at(), "Discarding expired token");
                DenyReason::Expired
            }
        };

        if let Err(e) = store.clear() {
            tracing::warn!(error = %e, "Failed to clear session");
        }
        Access::Denied(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::MemorySessionStore;
    use crate::auth::token::test_token;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(10_000, 0).unwrap()
    }

    #[test]
    fn test_no_token_denied() {
        let store = MemorySessionStore::new();
        assert_eq!(
            RouteGuard::check(&store, now()),
            Access::Denied(DenyReason::NoToken)
        );
    }

    #[test]
    fn test_valid_token_granted() {
        let token = test_token(json!({"sub": 3, "exp": 20_000}));
        let store = MemorySessionStore::with_session(&Session {
            user_name: Some("Jo".to_string()),
            ..Session::with_token(token)
        });

        match RouteGuard::check(&store, now()) {
            Access::Granted { session, claims } => {
                assert_eq!(session.user_name.as_deref(), Some("Jo"));
                assert_eq!(claims.user_id().as_deref(), Some("3"));
            }
            other => panic!("expected access, got {:?}", other),
        }
    }

    #[test]
    fn test_expired_token_clears_session() {
        let token = test_token(json!({"sub": 3, "exp": 5_000}));
        let store = MemorySessionStore::with_session(&Session {
            council_name: Some("Riverside".to_string()),
            ..Session::with_token(token)
        });

        assert_eq!(
            RouteGuard::check(&store, now()),
            Access::Denied(DenyReason::Expired)
        );
        assert_eq!(store.load().unwrap(), Session::default());
    }

    #[test]
    fn test_malformed_token_clears_session() {
        let store = MemorySessionStore::with_session(&Session::with_token("junk"));
        let access = RouteGuard::check(&store, now());
        assert_eq!(access, Access::Denied(DenyReason::Malformed));
        assert!(!store.load().unwrap().is_signed_in());
        assert_eq!(
            DenyReason::Malformed.message(),
            "Your session has expired or is invalid. Please log in again."
        );
    }
}
