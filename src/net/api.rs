//! REST binding for the auth and user-administration endpoints.
//!
//! `AuthApi` is the seam the session store and screens talk through; the
//! store is generic over it so tests can substitute a scripted double.
//! `RestAuthApi` is the production implementation: pure request shaping and
//! envelope unwrapping over the [`Transport`], no decisions of its own.

use super::error::ApiError;
use super::transport::Transport;
use super::types::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, ProfileUpdate,
    RegisterRequest, RegisterResponse, User, UserResponse, UserUpdate, UsersResponse,
};

/// Domain operations exposed by the backend's auth surface.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Exchange credentials for a session token and identity.
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError>;
    /// Create an account. Does not establish a session.
    async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ApiError>;
    /// Invalidate the current session server-side.
    async fn logout(&self) -> Result<MessageResponse, ApiError>;
    /// Fetch the identity behind the current credential.
    async fn fetch_self(&self) -> Result<User, ApiError>;
    /// Update the caller's own profile.
    async fn update_profile(&self, patch: &ProfileUpdate) -> Result<User, ApiError>;
    /// Change the caller's password.
    async fn change_password(
        &self,
        req: &ChangePasswordRequest,
    ) -> Result<MessageResponse, ApiError>;
    /// List all users.
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;
    /// Fetch one user by id.
    async fn get_user(&self, id: &str) -> Result<User, ApiError>;
    /// Update one user by id.
    async fn update_user(&self, id: &str, patch: &UserUpdate) -> Result<User, ApiError>;
    /// Delete one user by id.
    async fn delete_user(&self, id: &str) -> Result<MessageResponse, ApiError>;
}

/// Transport-backed implementation of [`AuthApi`].
#[derive(Clone)]
pub struct RestAuthApi {
    transport: Transport,
}

impl RestAuthApi {
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

impl AuthApi for RestAuthApi {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.transport.post("/api/auth/login", req).await
    }

    async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.transport.post("/api/auth/register", req).await
    }

    async fn logout(&self) -> Result<MessageResponse, ApiError> {
        self.transport.post_empty("/api/auth/logout").await
    }

    async fn fetch_self(&self) -> Result<User, ApiError> {
        let resp: UserResponse = self.transport.get("/api/auth/me").await?;
        Ok(resp.user)
    }

    async fn update_profile(&self, patch: &ProfileUpdate) -> Result<User, ApiError> {
        let resp: UserResponse = self.transport.put("/api/auth/profile", patch).await?;
        Ok(resp.user)
    }

    async fn change_password(
        &self,
        req: &ChangePasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.transport.put("/api/auth/change-password", req).await
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let resp: UsersResponse = self.transport.get("/api/auth/users").await?;
        Ok(resp.users)
    }

    async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        let resp: UserResponse = self.transport.get(&format!("/api/auth/users/{id}")).await?;
        Ok(resp.user)
    }

    async fn update_user(&self, id: &str, patch: &UserUpdate) -> Result<User, ApiError> {
        let resp: UserResponse = self
            .transport
            .put(&format!("/api/auth/users/{id}"), patch)
            .await?;
        Ok(resp.user)
    }

    async fn delete_user(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.transport.delete(&format!("/api/auth/users/{id}")).await
    }
}
