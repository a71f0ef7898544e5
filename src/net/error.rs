//! Error taxonomy for backend communication.
//!
//! CLASSIFICATION
//! ==============
//! Every failure that crosses the transport boundary collapses into one of
//! three shapes: the backend was unreachable (`Network`), the backend
//! answered with an error status (`Http`), or the exchange produced
//! something we could not make sense of (`Unknown`). Screens additionally
//! raise `AuthError::Validation` for checks that never leave the client.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// A failure reported by the HTTP transport.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No reachable backend: connection refused, DNS failure, or timeout.
    #[error("network unreachable")]
    Network,
    /// The backend responded with a non-2xx status and an error message.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// Anything else, e.g. a malformed response body.
    #[error("unexpected response: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Whether this error means the current credential was rejected.
    ///
    /// The transport never tears the session down itself; screens use this
    /// to decide when to force re-authentication via `logout()`.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

/// A failure from a session-store operation: either a transport error or a
/// client-local validation error raised before any network call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Validation(String),
}

impl AuthError {
    /// Derive a user-facing message, preferring the backend-declared error,
    /// then a network-unavailable message, then a generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Api(ApiError::Http { message, .. }) => message.clone(),
            Self::Api(ApiError::Network) => {
                "Unable to reach the server. Please check your connection.".to_owned()
            }
            Self::Api(ApiError::Unknown(_)) => {
                "Something went wrong. Please try again.".to_owned()
            }
        }
    }
}

/// Classify a non-2xx response body into an `ApiError::Http`.
///
/// The backend declares errors as `{"error": "..."}`; some endpoints use
/// `{"message": "..."}` instead. Unstructured bodies fall back to a generic
/// per-status message.
#[must_use]
pub fn classify_error_body(status: u16, body: &str) -> ApiError {
    let declared = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.as_str())
                .or_else(|| v.get("message").and_then(|m| m.as_str()))
                .map(ToOwned::to_owned)
        });

    ApiError::Http {
        status,
        message: declared.unwrap_or_else(|| default_status_message(status).to_owned()),
    }
}

/// Generic message for a status code when the body declares none.
#[must_use]
pub fn default_status_message(status: u16) -> &'static str {
    match status {
        400 => "Invalid request",
        401 => "Not authenticated",
        403 => "Not authorized",
        404 => "Not found",
        409 => "Conflict with existing data",
        422 => "Request could not be processed",
        500..=599 => "Server error",
        _ => "Request failed",
    }
}
