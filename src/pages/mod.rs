//! Screens that participate in session transitions, plus the user-admin
//! screen that exercises the REST user binding.

pub mod dashboard;
pub mod login;
pub mod profile;
pub mod register;
pub mod users;

use leptos::prelude::{RwSignal, Set};

use crate::net::api::AuthApi;
use crate::net::error::{ApiError, AuthError};
use crate::state::session::SessionStore;
use crate::state::storage::CredentialStorage;

/// Shared screen-side policy for resource-call failures.
///
/// The transport never tears the session down itself; when a screen's call
/// comes back 401 the credential is stale, so force re-authentication via
/// `logout()` (the protected gate then redirects). Anything else becomes an
/// inline message.
pub(crate) async fn handle_screen_error<A: AuthApi, S: CredentialStorage>(
    store: &SessionStore<A, S>,
    err: ApiError,
    message: RwSignal<Option<String>>,
) {
    if err.is_unauthorized() {
        store.logout().await;
    } else {
        message.set(Some(AuthError::from(err).user_message()));
    }
}
