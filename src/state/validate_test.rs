use super::*;

#[test]
fn password_at_minimum_length_passes() {
    assert!(password_length("abcdef").is_ok());
}

#[test]
fn password_below_minimum_length_is_rejected() {
    let err = password_length("new1").expect_err("five characters or fewer must fail");
    assert!(matches!(err, AuthError::Validation(_)));
    assert!(err.user_message().contains("at least 6"));
}

#[test]
fn empty_password_is_rejected() {
    assert!(password_length("").is_err());
}

#[test]
fn matching_confirmation_passes() {
    assert!(password_confirmation("secret1", "secret1").is_ok());
}

#[test]
fn mismatched_confirmation_is_rejected() {
    let err = password_confirmation("secret1", "secret2").expect_err("mismatch must fail");
    assert_eq!(err.user_message(), "Passwords do not match.");
}
