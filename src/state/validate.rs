//! Client-local form checks, raised before any network round trip.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::net::error::AuthError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check a password against the minimum length.
///
/// # Errors
///
/// Returns `AuthError::Validation` when the password is too short.
pub fn password_length(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters."
        )));
    }
    Ok(())
}

/// Check that a password and its confirmation agree.
///
/// # Errors
///
/// Returns `AuthError::Validation` when they differ.
pub fn password_confirmation(password: &str, confirmation: &str) -> Result<(), AuthError> {
    if password != confirmation {
        return Err(AuthError::Validation("Passwords do not match.".to_owned()));
    }
    Ok(())
}
