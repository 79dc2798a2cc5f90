//! Session in `localStorage`

use localgov::auth::session::{Session, SessionError, SessionResult, SessionStore, SESSION_KEYS};
use web_sys::Storage;

/// The browser's `localStorage`, under the shared session keys
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

fn storage() -> SessionResult<Storage> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or_else(|| SessionError::Unavailable("localStorage is not available".to_string()))
}

fn refused(key: &str) -> SessionError {
    SessionError::Unavailable(format!("localStorage refused {}", key))
}

impl SessionStore for LocalStorageStore {
    fn load(&self) -> SessionResult<Session> {
        let storage = storage()?;
        Ok(Session::from_entries(|key| {
            storage.get_item(key).ok().flatten()
        }))
    }

    fn save(&self, session: &Session) -> SessionResult<()> {
        self.clear()?;
        let storage = storage()?;
        for (key, value) in session.to_entries() {
            storage.set_item(&key, &value).map_err(|_| refused(&key))?;
        }
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let storage = storage()?;
        for key in SESSION_KEYS {
            storage.remove_item(key).map_err(|_| refused(key))?;
        }
        Ok(())
    }
}
