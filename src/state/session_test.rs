use std::sync::{Arc, Mutex};

use futures::executor::block_on;
use leptos::prelude::Owner;

use super::*;
use crate::net::types::{LoginResponse, MessageResponse, Ref, RegisterResponse, UserUpdate};
use crate::state::storage::{CredentialStorage, MemoryStorage, StoredSession};

// =============================================================
// Test doubles
// =============================================================

type Scripted<T> = Arc<Mutex<Option<Result<T, ApiError>>>>;

/// Scripted remote binding. Each operation records its name and answers
/// from the script; unscripted operations fail loudly.
#[derive(Clone, Default)]
struct FakeApi {
    login_result: Scripted<LoginResponse>,
    register_result: Scripted<RegisterResponse>,
    logout_result: Scripted<MessageResponse>,
    fetch_self_results: Arc<Mutex<Vec<Result<User, ApiError>>>>,
    update_profile_result: Scripted<User>,
    change_password_result: Scripted<MessageResponse>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl FakeApi {
    fn record(&self, name: &'static str) {
        self.calls.lock().expect("calls lock").push(name);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn take<T>(slot: &Scripted<T>) -> Result<T, ApiError> {
        slot.lock()
            .expect("script lock")
            .take()
            .unwrap_or_else(|| Err(ApiError::Unknown("unscripted call".to_owned())))
    }

    fn script<T>(slot: &Scripted<T>, result: Result<T, ApiError>) {
        *slot.lock().expect("script lock") = Some(result);
    }
}

impl AuthApi for FakeApi {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let _ = req;
        self.record("login");
        Self::take(&self.login_result)
    }

    async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        let _ = req;
        self.record("register");
        Self::take(&self.register_result)
    }

    async fn logout(&self) -> Result<MessageResponse, ApiError> {
        self.record("logout");
        Self::take(&self.logout_result)
    }

    async fn fetch_self(&self) -> Result<User, ApiError> {
        self.record("fetch_self");
        let mut queued = self.fetch_self_results.lock().expect("script lock");
        if queued.is_empty() {
            Err(ApiError::Unknown("unscripted call".to_owned()))
        } else {
            queued.remove(0)
        }
    }

    async fn update_profile(&self, patch: &ProfileUpdate) -> Result<User, ApiError> {
        let _ = patch;
        self.record("update_profile");
        Self::take(&self.update_profile_result)
    }

    async fn change_password(
        &self,
        req: &ChangePasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        let _ = req;
        self.record("change_password");
        Self::take(&self.change_password_result)
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.record("list_users");
        Err(ApiError::Unknown("unscripted call".to_owned()))
    }

    async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        let _ = id;
        self.record("get_user");
        Err(ApiError::Unknown("unscripted call".to_owned()))
    }

    async fn update_user(&self, id: &str, patch: &UserUpdate) -> Result<User, ApiError> {
        let _ = (id, patch);
        self.record("update_user");
        Err(ApiError::Unknown("unscripted call".to_owned()))
    }

    async fn delete_user(&self, id: &str) -> Result<MessageResponse, ApiError> {
        let _ = id;
        self.record("delete_user");
        Err(ApiError::Unknown("unscripted call".to_owned()))
    }
}

// =============================================================
// Helpers
// =============================================================

fn ada() -> User {
    User {
        id: "u1".to_owned(),
        name: "Ada".to_owned(),
        email: "ada@x.com".to_owned(),
        role: Ref::Id("admin".to_owned()),
        company: None,
        branch: None,
    }
}

fn message(text: &str) -> MessageResponse {
    MessageResponse { message: text.to_owned() }
}

struct Harness {
    _owner: Owner,
    api: FakeApi,
    storage: MemoryStorage,
    cell: CredentialCell,
    store: SessionStore<FakeApi, MemoryStorage>,
}

fn harness(storage: MemoryStorage) -> Harness {
    let owner = Owner::new();
    owner.set();
    let api = FakeApi::default();
    let cell: CredentialCell = Arc::new(Mutex::new(None));
    let store = SessionStore::new(api.clone(), storage.clone(), cell.clone());
    Harness { _owner: owner, api, storage, cell, store }
}

fn stored_token(token: &str) -> MemoryStorage {
    MemoryStorage::with_session(StoredSession { token: token.to_owned(), user: Some(ada()) })
}

fn assert_invariant(state: &SessionState) {
    assert_eq!(
        state.user.is_some(),
        state.credential.is_some(),
        "user and credential must be present together"
    );
    if state.status == SessionStatus::Authenticated {
        assert!(state.user.is_some());
    } else {
        assert!(state.user.is_none());
    }
}

// =============================================================
// Hydration
// =============================================================

#[test]
fn hydrate_without_credential_resolves_unauthenticated_without_network() {
    let h = harness(MemoryStorage::default());
    assert_eq!(h.store.status(), SessionStatus::Idle);

    let status = block_on(h.store.hydrate());

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert!(h.api.calls().is_empty(), "no network call may be issued");
    assert_invariant(&h.store.state().get_untracked());
}

#[test]
fn hydrate_with_valid_credential_authenticates() {
    let h = harness(stored_token("tok-1"));
    h.api
        .fetch_self_results
        .lock()
        .expect("script lock")
        .push(Ok(ada()));

    let status = block_on(h.store.hydrate());

    assert_eq!(status, SessionStatus::Authenticated);
    let state = h.store.state().get_untracked();
    assert_eq!(state.user.as_ref().map(|u| u.name.as_str()), Some("Ada"));
    assert_eq!(state.credential.as_deref(), Some("tok-1"));
    assert_eq!(
        crate::net::transport::cell_get(&h.cell).as_deref(),
        Some("tok-1")
    );
    assert_invariant(&state);
}

#[test]
fn hydrate_with_rejected_credential_clears_storage_without_throwing() {
    let h = harness(stored_token("tok-expired"));
    h.api.fetch_self_results.lock().expect("script lock").push(Err(ApiError::Http {
        status: 401,
        message: "Not authenticated".to_owned(),
    }));

    let status = block_on(h.store.hydrate());

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert!(h.storage.load().is_none(), "storage must be cleared");
    assert!(crate::net::transport::cell_get(&h.cell).is_none());
    assert_invariant(&h.store.state().get_untracked());
}

#[test]
fn hydrate_retries_once_on_connectivity_failure() {
    let h = harness(stored_token("tok-1"));
    {
        let mut queued = h.api.fetch_self_results.lock().expect("script lock");
        queued.push(Err(ApiError::Network));
        queued.push(Ok(ada()));
    }

    let status = block_on(h.store.hydrate());

    assert_eq!(status, SessionStatus::Authenticated);
    assert_eq!(h.api.calls(), vec!["fetch_self", "fetch_self"]);
}

#[test]
fn hydrate_gives_up_after_second_connectivity_failure() {
    let h = harness(stored_token("tok-1"));
    {
        let mut queued = h.api.fetch_self_results.lock().expect("script lock");
        queued.push(Err(ApiError::Network));
        queued.push(Err(ApiError::Network));
    }

    let status = block_on(h.store.hydrate());

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert!(h.storage.load().is_none());
}

#[test]
fn hydrate_does_not_retry_http_rejections() {
    let h = harness(stored_token("tok-expired"));
    h.api.fetch_self_results.lock().expect("script lock").push(Err(ApiError::Http {
        status: 401,
        message: "Not authenticated".to_owned(),
    }));

    block_on(h.store.hydrate());

    assert_eq!(h.api.calls(), vec!["fetch_self"]);
}

#[test]
fn second_hydrate_answers_from_state_without_network() {
    let h = harness(MemoryStorage::default());
    block_on(h.store.hydrate());

    let status = block_on(h.store.hydrate());

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert!(h.api.calls().is_empty());
}

// =============================================================
// Login / register
// =============================================================

#[test]
fn login_success_authenticates_and_persists() {
    let h = harness(MemoryStorage::default());
    block_on(h.store.hydrate());
    FakeApi::script(
        &h.api.login_result,
        Ok(LoginResponse { session_token: "tok-9".to_owned(), user: ada() }),
    );

    let user = block_on(h.store.login("ada@x.com", "correct")).expect("login should succeed");

    assert_eq!(user.name, "Ada");
    assert_eq!(h.store.status(), SessionStatus::Authenticated);
    let stored = h.storage.load().expect("credential must be persisted");
    assert_eq!(stored.token, "tok-9");
    assert_eq!(stored.user.map(|u| u.id), Some("u1".to_owned()));
    assert_invariant(&h.store.state().get_untracked());
}

#[test]
fn login_failure_surfaces_message_and_persists_nothing() {
    let h = harness(MemoryStorage::default());
    block_on(h.store.hydrate());
    FakeApi::script(
        &h.api.login_result,
        Err(ApiError::Http { status: 401, message: "Invalid credentials".to_owned() }),
    );

    let err = block_on(h.store.login("a@b.com", "wrong")).expect_err("login should fail");

    assert_eq!(err.user_message(), "Invalid credentials");
    assert_eq!(h.store.status(), SessionStatus::Unauthenticated);
    assert!(h.storage.load().is_none(), "storage must stay untouched");
    assert_invariant(&h.store.state().get_untracked());
}

#[test]
fn register_never_establishes_a_session() {
    let h = harness(MemoryStorage::default());
    block_on(h.store.hydrate());
    FakeApi::script(
        &h.api.register_result,
        Ok(RegisterResponse { message: "created".to_owned(), user: ada() }),
    );

    let req = RegisterRequest {
        name: "Ada".to_owned(),
        email: "ada@x.com".to_owned(),
        password: "secret1".to_owned(),
        role: "admin".to_owned(),
    };
    block_on(h.store.register(&req)).expect("register should succeed");

    assert_eq!(h.store.status(), SessionStatus::Unauthenticated);
    assert!(h.storage.load().is_none());
}

#[test]
fn register_rejects_short_password_before_any_network_call() {
    let h = harness(MemoryStorage::default());
    let req = RegisterRequest {
        name: "Ada".to_owned(),
        email: "ada@x.com".to_owned(),
        password: "abc".to_owned(),
        role: "admin".to_owned(),
    };

    let err = block_on(h.store.register(&req)).expect_err("short password must be rejected");

    assert!(matches!(err, AuthError::Validation(_)));
    assert!(h.api.calls().is_empty());
}

// =============================================================
// Logout
// =============================================================

fn login_ada(h: &Harness) {
    FakeApi::script(
        &h.api.login_result,
        Ok(LoginResponse { session_token: "tok-9".to_owned(), user: ada() }),
    );
    block_on(h.store.login("ada@x.com", "correct")).expect("login should succeed");
}

#[test]
fn logout_clears_local_session_even_when_backend_unreachable() {
    let h = harness(MemoryStorage::default());
    login_ada(&h);
    FakeApi::script(&h.api.logout_result, Err(ApiError::Network));

    block_on(h.store.logout());

    assert_eq!(h.store.status(), SessionStatus::Unauthenticated);
    assert!(h.storage.load().is_none());
    assert!(crate::net::transport::cell_get(&h.cell).is_none());
    assert_invariant(&h.store.state().get_untracked());
}

#[test]
fn logout_success_tears_down_the_same_way() {
    let h = harness(MemoryStorage::default());
    login_ada(&h);
    FakeApi::script(&h.api.logout_result, Ok(message("bye")));

    block_on(h.store.logout());

    assert_eq!(h.store.status(), SessionStatus::Unauthenticated);
    assert!(h.storage.load().is_none());
}

// =============================================================
// Profile and password
// =============================================================

#[test]
fn update_profile_replaces_user_and_snapshot_together() {
    let h = harness(MemoryStorage::default());
    login_ada(&h);
    let renamed = User { name: "Ada L.".to_owned(), ..ada() };
    FakeApi::script(&h.api.update_profile_result, Ok(renamed.clone()));

    let patch = ProfileUpdate { name: Some("Ada L.".to_owned()), email: None };
    let user = block_on(h.store.update_profile(&patch)).expect("update should succeed");

    assert_eq!(user, renamed);
    let state = h.store.state().get_untracked();
    let stored = h.storage.load().expect("snapshot must persist");
    assert_eq!(state.user.as_ref(), Some(&renamed));
    assert_eq!(stored.user.as_ref(), Some(&renamed));
    assert_eq!(stored.token, "tok-9", "token is untouched by profile updates");
}

#[test]
fn update_profile_failure_changes_nothing() {
    let h = harness(MemoryStorage::default());
    login_ada(&h);
    FakeApi::script(
        &h.api.update_profile_result,
        Err(ApiError::Http { status: 422, message: "Email already taken".to_owned() }),
    );

    let patch = ProfileUpdate { email: Some("taken@x.com".to_owned()), name: None };
    let err = block_on(h.store.update_profile(&patch)).expect_err("update should fail");

    assert_eq!(err.user_message(), "Email already taken");
    assert_eq!(h.store.state().get_untracked().user, Some(ada()));
    assert_eq!(h.storage.load().map(|s| s.user), Some(Some(ada())));
}

#[test]
fn update_profile_without_session_is_a_validation_error() {
    let h = harness(MemoryStorage::default());
    block_on(h.store.hydrate());

    let patch = ProfileUpdate { name: Some("x".to_owned()), email: None };
    let err = block_on(h.store.update_profile(&patch)).expect_err("must reject");

    assert!(matches!(err, AuthError::Validation(_)));
    assert!(h.api.calls().is_empty());
}

#[test]
fn change_password_rejects_short_password_before_any_network_call() {
    let h = harness(MemoryStorage::default());
    login_ada(&h);
    let calls_before = h.api.calls().len();

    let err = block_on(h.store.change_password("old1", "new1")).expect_err("must reject");

    assert!(matches!(err, AuthError::Validation(_)));
    assert_eq!(h.api.calls().len(), calls_before, "no round trip may be spent");
}

#[test]
fn change_password_surfaces_backend_mismatch_message() {
    let h = harness(MemoryStorage::default());
    login_ada(&h);
    FakeApi::script(
        &h.api.change_password_result,
        Err(ApiError::Http { status: 400, message: "Old password is incorrect".to_owned() }),
    );

    let err =
        block_on(h.store.change_password("wrong-old", "long-enough")).expect_err("must fail");

    assert_eq!(err.user_message(), "Old password is incorrect");
    assert_eq!(h.store.status(), SessionStatus::Authenticated);
}

#[test]
fn change_password_success_has_no_local_state_effect() {
    let h = harness(MemoryStorage::default());
    login_ada(&h);
    FakeApi::script(&h.api.change_password_result, Ok(message("changed")));

    block_on(h.store.change_password("old-pass", "new-pass")).expect("should succeed");

    assert_eq!(h.store.status(), SessionStatus::Authenticated);
    assert_eq!(h.store.state().get_untracked().user, Some(ada()));
}

// =============================================================
// Screen-side 401 policy
// =============================================================

#[test]
fn unauthorized_screen_error_forces_logout() {
    let h = harness(MemoryStorage::default());
    login_ada(&h);
    FakeApi::script(&h.api.logout_result, Ok(message("bye")));
    let message_slot = leptos::prelude::RwSignal::new(None::<String>);

    block_on(crate::pages::handle_screen_error(
        &h.store,
        ApiError::Http { status: 401, message: "Not authenticated".to_owned() },
        message_slot,
    ));

    assert_eq!(h.store.status(), SessionStatus::Unauthenticated);
    assert!(h.storage.load().is_none());
    assert!(message_slot.get_untracked().is_none(), "teardown, not an inline message");
}

#[test]
fn other_screen_errors_become_inline_messages() {
    let h = harness(MemoryStorage::default());
    login_ada(&h);
    let message_slot = leptos::prelude::RwSignal::new(None::<String>);

    block_on(crate::pages::handle_screen_error(
        &h.store,
        ApiError::Http { status: 500, message: "Server error".to_owned() },
        message_slot,
    ));

    assert_eq!(h.store.status(), SessionStatus::Authenticated);
    assert_eq!(message_slot.get_untracked(), Some("Server error".to_owned()));
}
