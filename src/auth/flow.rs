//! Sign in, sign up and sign out

use thiserror::Error;

use super::session::{Session, SessionError, SessionStore};
use super::token::TokenClaims;
use crate::client::{ClientError, LoginRequest, PortalApi, RegisterRequest};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const REGISTRATION_OK: &str = "Registration successful! You can now log in.";

/// Errors from the login and signup flows
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    /// The server said no; the text is safe to show the resident
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Could not save session: {0}")]
    Session(#[from] SessionError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// A successful registration
#[derive(Debug, Clone, PartialEq)]
pub struct Registered {
    pub message: String,
    /// Set when the server issued a token straight away
    pub session: Option<Session>,
}

fn credentials(email: &str, password: &str) -> AuthResult<(String, String)> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok((email.to_string(), password.to_string()))
}

/// New session for `token`, with the display name from its claims
fn session_for(token: String) -> Session {
    let user_name = TokenClaims::decode(&token)
        .ok()
        .and_then(|claims| claims.name);
    Session {
        user_name,
        ..Session::with_token(token)
    }
}

/// Exchange credentials for a token and store it
pub async fn login(
    api: &dyn PortalApi,
    store: &dyn SessionStore,
    email: &str,
    password: &str,
) -> AuthResult<Session> {
    let (email, password) = credentials(email, password)?;

    let reply = api.login(&LoginRequest { email, password }).await?;
    let Some(token) = reply.token.clone() else {
        tracing::info!(status = reply.status, "Login rejected");
        return Err(AuthError::Rejected(
            reply.reason().unwrap_or(LOGIN_FAILED).to_string(),
        ));
    };

    let session = session_for(token);
    store.save(&session)?;
    tracing::info!("Login succeeded");
    Ok(session)
}

/// Create an account. Any token issued with the reply is stored.
pub async fn register(
    api: &dyn PortalApi,
    store: &dyn SessionStore,
    name: &str,
    email: &str,
    password: &str,
) -> AuthResult<Registered> {
    let (email, password) = credentials(email, password)?;
    let request = RegisterRequest {
        name: name.trim().to_string(),
        email,
        password,
    };

    let reply = api.register(&request).await?;
    if !reply.is_success() {
        tracing::info!(status = reply.status, "Registration rejected");
        return Err(AuthError::Rejected(
            reply.reason().unwrap_or(REGISTRATION_FAILED).to_string(),
        ));
    }

    let session = match reply.token {
        Some(token) => {
            let mut session = session_for(token);
            if session.user_name.is_none() && !request.name.is_empty() {
                session.user_name = Some(request.name.clone());
            }
            store.save(&session)?;
            Some(session)
        }
        None => None,
    };

    tracing::info!(signed_in = session.is_some(), "Registration succeeded");
    Ok(Registered {
        message: REGISTRATION_OK.to_string(),
        session,
    })
}

/// Forget the stored session
pub fn logout(store: &dyn SessionStore) -> AuthResult<()> {
    store.clear()?;
    tracing::info!("Logged out");
    Ok(())
}
