//! Session cache
//!
//! The browser keeps the bearer token and a few header fields in
//! `localStorage`. Every front end stores the same four keys through a
//! [`SessionStore`] so a session means the same thing everywhere.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;
use thiserror::Error;

use super::token::TokenClaims;

pub const TOKEN_KEY: &str = "token";
pub const USER_NAME_KEY: &str = "userName";
pub const COUNCIL_NAME_KEY: &str = "userCouncilName";
pub const COUNCIL_LOGO_KEY: &str = "userCouncilLogoUrl";

/// Every key a session owns, cleared together
pub const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, USER_NAME_KEY, COUNCIL_NAME_KEY, COUNCIL_LOGO_KEY];

/// Errors raised by session backends
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Browser storage missing or refusing writes
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Token plus the cached header fields
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user_name: Option<String>,
    pub council_name: Option<String>,
    pub council_logo_url: Option<String>,
}

impl Session {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Default::default()
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Flatten to storage keys, skipping empty fields
    pub fn to_entries(&self) -> BTreeMap<String, String> {
        [
            (TOKEN_KEY, &self.token),
            (USER_NAME_KEY, &self.user_name),
            (COUNCIL_NAME_KEY, &self.council_name),
            (COUNCIL_LOGO_KEY, &self.council_logo_url),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .filter(|v| !v.is_empty())
                .map(|v| (key.to_string(), v.clone()))
        })
        .collect()
    }

    /// Read from storage keys, ignoring anything unrelated
    pub fn from_entries(mut get: impl FnMut(&str) -> Option<String>) -> Self {
        let mut field = |key: &str| get(key).filter(|v| !v.is_empty());
        Self {
            token: field(TOKEN_KEY),
            user_name: field(USER_NAME_KEY),
            council_name: field(COUNCIL_NAME_KEY),
            council_logo_url: field(COUNCIL_LOGO_KEY),
        }
    }
}

/// Somewhere to keep a session between runs
pub trait SessionStore {
    fn load(&self) -> SessionResult<Session>;

    /// Replace the stored session. Empty fields remove their key.
    fn save(&self, session: &Session) -> SessionResult<()>;

    /// Remove every session key
    fn clear(&self) -> SessionResult<()>;
}

/// Decoded user id of the stored token
pub fn current_user_id(store: &dyn SessionStore) -> Option<String> {
    let token = store.load().ok()?.token?;
    match TokenClaims::decode(&token) {
        Ok(claims) => claims.user_id(),
        Err(e) => {
            tracing::debug!(error = %e, "Stored token could not be decoded");
            None
        }
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: &Session) -> Self {
        Self {
            entries: Mutex::new(session.to_entries()),
        }
    }

    fn lock(&self) -> SessionResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| SessionError::Unavailable(e.to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> SessionResult<Session> {
        let entries = self.lock()?;
        Ok(Session::from_entries(|key| entries.get(key).cloned()))
    }

    fn save(&self, session: &Session) -> SessionResult<()> {
        let mut entries = self.lock()?;
        for key in SESSION_KEYS {
            entries.remove(key);
        }
        entries.extend(session.to_entries());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let mut entries = self.lock()?;
        for key in SESSION_KEYS {
            entries.remove(key);
        }
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileSessionStore;

#[cfg(feature = "native")]
mod file {
    use super::*;
    use std::path::{Path, PathBuf};

    /// JSON file of storage keys, one per user profile
    #[derive(Debug, Clone)]
    pub struct FileSessionStore {
        path: PathBuf,
    }

    impl FileSessionStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// `<data_dir>/localgov/session.json`
        pub fn default_path() -> Option<PathBuf> {
            dirs::data_dir().map(|d| d.join("localgov").join("session.json"))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_entries(&self) -> SessionResult<BTreeMap<String, String>> {
            if !self.path.exists() {
                return Ok(BTreeMap::new());
            }
            let content = std::fs::read_to_string(&self.path)?;
            if content.trim().is_empty() {
                return Ok(BTreeMap::new());
            }
            Ok(serde_json::from_str(&content)?)
        }

        /// Entries to rewrite on save or clear. An unreadable file is
        /// replaced rather than blocking sign-in and sign-out.
        fn writable_entries(&self) -> SessionResult<BTreeMap<String, String>> {
            match self.read_entries() {
                Err(SessionError::Serialization(e)) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Session file is corrupt, starting afresh"
                    );
                    Ok(BTreeMap::new())
                }
                other => other,
            }
        }

        fn write_entries(&self, entries: &BTreeMap<String, String>) -> SessionResult<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(entries)?;
            std::fs::write(&self.path, content)?;
            tracing::debug!(path = %self.path.display(), "Session saved");
            Ok(())
        }
    }

    impl SessionStore for FileSessionStore {
        fn load(&self) -> SessionResult<Session> {
            let entries = self.read_entries()?;
            Ok(Session::from_entries(|key| entries.get(key).cloned()))
        }

        fn save(&self, session: &Session) -> SessionResult<()> {
            let mut entries = self.writable_entries()?;
            for key in SESSION_KEYS {
                entries.remove(key);
            }
            entries.extend(session.to_entries());
            self.write_entries(&entries)
        }

        fn clear(&self) -> SessionResult<()> {
            let mut entries = self.writable_entries()?;
            for key in SESSION_KEYS {
                entries.remove(key);
            }
            self.write_entries(&entries)?;
            tracing::info!("Session cleared");
            Ok(())
        }
    }
}
