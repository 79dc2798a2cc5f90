//! Authentication
//!
//! Token decoding, the stored session, the route guard and the
//! login/signup flows built on top of them.

pub mod flow;
pub mod guard;
pub mod session;
pub mod token;

pub use flow::{login, logout, register, AuthError, AuthResult, Registered};
pub use guard::{Access, DenyReason, RouteGuard, LOGIN_ROUTE};
pub use session::{
    current_user_id, MemorySessionStore, Session, SessionError, SessionResult, SessionStore,
};
#[cfg(feature = "native")]
pub use session::FileSessionStore;
pub use token::{TokenClaims, TokenError, TokenResult, TokenStatus};
