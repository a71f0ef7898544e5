//! Persisted session storage.
//!
//! Two `localStorage` entries — the opaque session token and a JSON snapshot
//! of the current user — written only by session-store transitions and
//! always cleared together. The snapshot is a boot-time optimistic cache;
//! the authoritative identity is re-fetched on hydration, so a missing or
//! corrupt snapshot does not invalidate a stored token.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use serde::{Deserialize, Serialize};

use crate::net::types::User;

#[cfg(feature = "hydrate")]
const TOKEN_KEY: &str = "catalog_console_token";
#[cfg(feature = "hydrate")]
const USER_KEY: &str = "catalog_console_user";

/// The persisted credential pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: Option<User>,
}

/// Durable storage for the session credential and user snapshot.
pub trait CredentialStorage {
    /// Restore the persisted session, if one exists.
    fn load(&self) -> Option<StoredSession>;
    /// Persist both entries.
    fn save(&self, session: &StoredSession);
    /// Remove both entries.
    fn clear(&self);
}

/// `localStorage`-backed storage. Inert outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl CredentialStorage for BrowserStorage {
    fn load(&self) -> Option<StoredSession> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage()?;
            let token = storage.get_item(TOKEN_KEY).ok().flatten()?;
            if token.is_empty() {
                return None;
            }
            let user = storage
                .get_item(USER_KEY)
                .ok()
                .flatten()
                .and_then(|json| serde_json::from_str::<User>(&json).ok());
            Some(StoredSession { token, user })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, session: &StoredSession) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(TOKEN_KEY, &session.token);
                match session.user.as_ref().and_then(|u| serde_json::to_string(u).ok()) {
                    Some(json) => {
                        let _ = storage.set_item(USER_KEY, &json);
                    }
                    None => {
                        let _ = storage.remove_item(USER_KEY);
                    }
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = session;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(TOKEN_KEY);
                let _ = storage.remove_item(USER_KEY);
            }
        }
    }
}

/// In-memory storage for tests and non-browser builds.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    cell: std::sync::Arc<std::sync::Mutex<Option<StoredSession>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn with_session(session: StoredSession) -> Self {
        let storage = Self::default();
        storage.save(&session);
        storage
    }
}

impl CredentialStorage for MemoryStorage {
    fn load(&self) -> Option<StoredSession> {
        match self.cell.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, session: &StoredSession) {
        match self.cell.lock() {
            Ok(mut guard) => *guard = Some(session.clone()),
            Err(poisoned) => *poisoned.into_inner() = Some(session.clone()),
        }
    }

    fn clear(&self) {
        match self.cell.lock() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}
