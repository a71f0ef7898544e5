//! Wire types shared between the transport, the auth binding, and screens.
//!
//! POLYMORPHIC REFERENCES
//! ======================
//! The backend is inconsistent about related entities: `role`, `company`,
//! and `branch` arrive either as a bare identifier string or as an embedded
//! object. `Ref<T>` models both forms once, with a single `display()`
//! normalization, instead of ad hoc checks at every call site.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// An entity reference that is either embedded inline or named by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Embedded(T),
    Id(String),
}

/// Entities that carry a human-readable label.
pub trait Labeled {
    fn label(&self) -> &str;
}

impl<T: Labeled> Ref<T> {
    /// Display form: the embedded entity's label, or the bare identifier.
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            Self::Embedded(entity) => entity.label(),
            Self::Id(id) => id,
        }
    }
}

/// A role assigned to a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
}

impl Labeled for Role {
    fn label(&self) -> &str {
        &self.name
    }
}

/// A company a user belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
}

impl Labeled for Company {
    fn label(&self) -> &str {
        &self.name
    }
}

/// A branch within a company.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
}

impl Labeled for Branch {
    fn label(&self) -> &str {
        &self.name
    }
}

/// Identity record for a console user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Ref<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Ref<Company>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Ref<Branch>>,
}

impl User {
    /// Display name of the user's role.
    #[must_use]
    pub fn role_name(&self) -> &str {
        self.role.display()
    }
}

// ---------------------------------------------------------------------------
// Request / response envelopes
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub session_token: String,
    pub user: User,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

/// `{message}` envelope used by logout, delete, and change-password.
#[derive(Clone, Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `{user}` envelope; `message` is present on some endpoints only.
#[derive(Clone, Debug, Deserialize)]
pub struct UserResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: User,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub users: Vec<User>,
}

/// Partial update of the caller's own profile.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Partial update of another user, admin-side.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}
