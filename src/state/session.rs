//! Session store: the single source of truth for "who is logged in".
//!
//! STATE MACHINE
//! =============
//! `Idle → Hydrating → Authenticated | Unauthenticated` at boot, then
//! `Authenticated ⇄ Unauthenticated` through `login`/`logout` only. The
//! explicit `Idle`/`Hydrating` states are what let the route gates hold a
//! loading view instead of flashing the wrong screen on reload — inferring
//! "not logged in" from "user is empty" would regress that.
//!
//! One store is constructed at process start and handed to consumers by
//! context. Operations are not deduplicated; callers disable their submit
//! controls while a call is outstanding.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::{GetUntracked, RwSignal, Set, Update};

use crate::net::api::AuthApi;
use crate::net::error::{ApiError, AuthError};
use crate::net::transport::{CredentialCell, cell_set};
use crate::net::types::{
    ChangePasswordRequest, LoginRequest, ProfileUpdate, RegisterRequest, User,
};
use crate::state::storage::{CredentialStorage, StoredSession};
use crate::state::validate;

/// Where the session currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// Process start; hydration has not begun.
    Idle,
    /// A persisted credential is being verified against the backend.
    Hydrating,
    Authenticated,
    Unauthenticated,
}

/// Process-wide authentication state.
///
/// Invariant: `user` and `credential` are both present iff the status is
/// `Authenticated`.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub status: SessionStatus,
    pub user: Option<User>,
    pub credential: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { status: SessionStatus::Idle, user: None, credential: None }
    }
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }
}

/// The session store.
///
/// Generic over the remote binding and the persisted storage so the whole
/// state machine runs in unit tests against scripted doubles.
#[derive(Clone)]
pub struct SessionStore<A, S> {
    state: RwSignal<SessionState>,
    api: A,
    storage: S,
    credential: CredentialCell,
}

impl<A: AuthApi, S: CredentialStorage> SessionStore<A, S> {
    #[must_use]
    pub fn new(api: A, storage: S, credential: CredentialCell) -> Self {
        Self { state: RwSignal::new(SessionState::default()), api, storage, credential }
    }

    /// Reactive handle to the session state, for gates and screens.
    #[must_use]
    pub fn state(&self) -> RwSignal<SessionState> {
        self.state
    }

    /// Remote binding, for screens making their own resource calls.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.state.get_untracked().status
    }

    /// Restore the session from persisted storage at process start.
    ///
    /// Returns the resolved status directly: hydration failures are
    /// recovered locally (storage cleared, `Unauthenticated`) and never
    /// surfaced, since no screen exists yet to show them. Idempotent —
    /// a second call answers from the current state without a network call.
    pub async fn hydrate(&self) -> SessionStatus {
        if self.status() != SessionStatus::Idle {
            return self.status();
        }

        let Some(stored) = self.storage.load() else {
            self.state.update(|s| s.status = SessionStatus::Unauthenticated);
            return SessionStatus::Unauthenticated;
        };

        self.state.update(|s| s.status = SessionStatus::Hydrating);
        cell_set(&self.credential, Some(stored.token.clone()));

        // The cached user snapshot is optimistic only; identity always comes
        // from a live fetch. Connectivity failures get a single retry, an
        // HTTP rejection is definitive.
        let mut outcome = self.api.fetch_self().await;
        if outcome == Err(ApiError::Network) {
            outcome = self.api.fetch_self().await;
        }

        match outcome {
            Ok(user) => {
                self.establish(stored.token, user);
                SessionStatus::Authenticated
            }
            Err(err) => {
                leptos::logging::warn!("session hydration failed: {err}");
                self.reset();
                SessionStatus::Unauthenticated
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// On failure nothing is persisted and the state is left as it was.
    ///
    /// # Errors
    ///
    /// Surfaces the transport error for the caller to display.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let req = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let resp = self.api.login(&req).await?;
        self.establish(resp.session_token, resp.user.clone());
        Ok(resp.user)
    }

    /// Create an account. Never establishes a session — the caller signs in
    /// separately.
    ///
    /// # Errors
    ///
    /// Local password-length validation first, then any transport error.
    pub async fn register(&self, req: &RegisterRequest) -> Result<(), AuthError> {
        validate::password_length(&req.password)?;
        self.api.register(req).await?;
        Ok(())
    }

    /// End the session. Local teardown is unconditional: the remote
    /// invalidation is best-effort so a user can always leave a stale
    /// session even when the backend is unreachable.
    pub async fn logout(&self) {
        if let Err(err) = self.api.logout().await {
            leptos::logging::warn!("remote logout failed, clearing local session: {err}");
        }
        self.reset();
    }

    /// Update the caller's own profile. The in-memory user and the persisted
    /// snapshot are replaced in one synchronous transition.
    ///
    /// # Errors
    ///
    /// Surfaces the transport error; the session state is unchanged.
    pub async fn update_profile(&self, patch: &ProfileUpdate) -> Result<User, AuthError> {
        let Some(token) = self.state.get_untracked().credential else {
            return Err(AuthError::Validation("No active session.".to_owned()));
        };
        let user = self.api.update_profile(patch).await?;
        self.storage
            .save(&StoredSession { token, user: Some(user.clone()) });
        self.state.update(|s| s.user = Some(user.clone()));
        Ok(user)
    }

    /// Change the caller's password. No local state effect.
    ///
    /// # Errors
    ///
    /// Rejects locally when the new password is too short, before any
    /// network call; otherwise surfaces the transport error (e.g. old
    /// password mismatch).
    pub async fn change_password(&self, old: &str, new: &str) -> Result<(), AuthError> {
        validate::password_length(new)?;
        if self.status() != SessionStatus::Authenticated {
            return Err(AuthError::Validation("No active session.".to_owned()));
        }
        let req = ChangePasswordRequest {
            old_password: old.to_owned(),
            new_password: new.to_owned(),
        };
        self.api.change_password(&req).await?;
        Ok(())
    }

    fn establish(&self, token: String, user: User) {
        self.storage
            .save(&StoredSession { token: token.clone(), user: Some(user.clone()) });
        cell_set(&self.credential, Some(token.clone()));
        self.state.set(SessionState {
            status: SessionStatus::Authenticated,
            user: Some(user),
            credential: Some(token),
        });
    }

    fn reset(&self) {
        self.storage.clear();
        cell_set(&self.credential, None);
        self.state.set(SessionState {
            status: SessionStatus::Unauthenticated,
            user: None,
            credential: None,
        });
    }
}
