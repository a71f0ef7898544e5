//! HTTP transport: the single outbound boundary for all backend calls.
//!
//! Client-side (hydrate): real HTTP via `gloo-net`, with the current session
//! credential attached as a bearer header and every call raced against a
//! default timeout. Server-side (SSR): inert stubs, since these endpoints
//! are only meaningful in the browser.
//!
//! The transport never interprets a 401 as "log out" — session teardown is
//! a caller decision, which keeps this boundary stateless.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Default per-request timeout. A hung request classifies as `Network` so
/// callers (notably boot-time hydration) never wait forever.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[cfg(not(feature = "hydrate"))]
const OFFLINE: &str = "not available on server";

/// Shared slot holding the current session credential.
///
/// Written only by the session store; read by the transport on every
/// outgoing request.
pub type CredentialCell = Arc<Mutex<Option<String>>>;

/// Read the credential cell without panicking on a poisoned lock.
#[must_use]
pub fn cell_get(cell: &CredentialCell) -> Option<String> {
    match cell.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replace the credential cell contents.
pub fn cell_set(cell: &CredentialCell, value: Option<String>) {
    match cell.lock() {
        Ok(mut guard) => *guard = value,
        Err(poisoned) => *poisoned.into_inner() = value,
    }
}

/// Format the authorization header value for a session token.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// HTTP boundary bound to a base URL and the shared credential cell.
#[derive(Clone)]
pub struct Transport {
    base: String,
    credential: CredentialCell,
    timeout_ms: u64,
}

impl Transport {
    /// Create a transport. An empty `base` issues same-origin requests.
    #[must_use]
    pub fn new(base: impl Into<String>, credential: CredentialCell) -> Self {
        Self { base: base.into(), credential, timeout_ms: DEFAULT_TIMEOUT_MS }
    }

    /// Current session credential, if any.
    #[must_use]
    pub fn credential(&self) -> Option<String> {
        cell_get(&self.credential)
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` classified per the transport rules.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.send(gloo_net::http::Method::GET, path, None).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
            Err(ApiError::Unknown(OFFLINE.to_owned()))
        }
    }

    /// `POST` a JSON body and parse a JSON response.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` classified per the transport rules.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let value = to_body(body)?;
            self.send(gloo_net::http::Method::POST, path, Some(value)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (path, body);
            Err(ApiError::Unknown(OFFLINE.to_owned()))
        }
    }

    /// `POST` with no request body.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` classified per the transport rules.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.send(gloo_net::http::Method::POST, path, None).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
            Err(ApiError::Unknown(OFFLINE.to_owned()))
        }
    }

    /// `PUT` a JSON body and parse a JSON response.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` classified per the transport rules.
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let value = to_body(body)?;
            self.send(gloo_net::http::Method::PUT, path, Some(value)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (path, body);
            Err(ApiError::Unknown(OFFLINE.to_owned()))
        }
    }

    /// `DELETE` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` classified per the transport rules.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.send(gloo_net::http::Method::DELETE, path, None).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
            Err(ApiError::Unknown(OFFLINE.to_owned()))
        }
    }

    /// Build, send, time-limit, and classify one request.
    #[cfg(feature = "hydrate")]
    async fn send<T: DeserializeOwned>(
        &self,
        method: gloo_net::http::Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        use futures::future::{Either, select};
        use std::pin::pin;

        let url = self.endpoint(path);
        let mut builder = gloo_net::http::RequestBuilder::new(&url)
            .method(method)
            .header("Accept", "application/json");
        if let Some(token) = self.credential() {
            builder = builder.header("Authorization", &bearer(&token));
        }

        let request = match body {
            Some(value) => builder.json(&value).map_err(|e| ApiError::Unknown(e.to_string()))?,
            None => builder.build().map_err(|e| ApiError::Unknown(e.to_string()))?,
        };

        let fetch = pin!(request.send());
        let deadline = pin!(gloo_timers::future::sleep(std::time::Duration::from_millis(
            self.timeout_ms
        )));
        let response = match select(fetch, deadline).await {
            Either::Left((Ok(resp), _)) => resp,
            // Fetch-level failures and timeouts both mean "no reachable backend".
            Either::Left((Err(_), _)) | Either::Right(_) => return Err(ApiError::Network),
        };

        if !response.ok() {
            let text = response.text().await.unwrap_or_default();
            return Err(super::error::classify_error_body(response.status(), &text));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Unknown(e.to_string()))
    }
}

#[cfg(feature = "hydrate")]
fn to_body<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Unknown(e.to_string()))
}
