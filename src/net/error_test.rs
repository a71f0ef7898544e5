use super::*;

// =============================================================
// Body classification
// =============================================================

#[test]
fn classification_prefers_declared_error_field() {
    let err = classify_error_body(401, r#"{"error":"Invalid credentials"}"#);
    assert_eq!(err, ApiError::Http { status: 401, message: "Invalid credentials".to_owned() });
}

#[test]
fn classification_falls_back_to_message_field() {
    let err = classify_error_body(409, r#"{"message":"Email already registered"}"#);
    assert_eq!(
        err,
        ApiError::Http { status: 409, message: "Email already registered".to_owned() }
    );
}

#[test]
fn classification_prefers_error_over_message() {
    let err = classify_error_body(400, r#"{"error":"e1","message":"m1"}"#);
    assert_eq!(err, ApiError::Http { status: 400, message: "e1".to_owned() });
}

#[test]
fn unstructured_body_uses_per_status_default() {
    let err = classify_error_body(404, "<html>not json</html>");
    assert_eq!(err, ApiError::Http { status: 404, message: "Not found".to_owned() });

    let err = classify_error_body(503, "");
    assert_eq!(err, ApiError::Http { status: 503, message: "Server error".to_owned() });
}

#[test]
fn structured_body_without_known_fields_uses_default() {
    let err = classify_error_body(401, r#"{"detail":"nope"}"#);
    assert_eq!(err, ApiError::Http { status: 401, message: "Not authenticated".to_owned() });
}

// =============================================================
// 401 detection
// =============================================================

#[test]
fn only_http_401_counts_as_unauthorized() {
    let unauthorized = ApiError::Http { status: 401, message: "x".to_owned() };
    assert!(unauthorized.is_unauthorized());

    assert!(!ApiError::Http { status: 403, message: "x".to_owned() }.is_unauthorized());
    assert!(!ApiError::Network.is_unauthorized());
    assert!(!ApiError::Unknown("x".to_owned()).is_unauthorized());
}

// =============================================================
// User-facing messages
// =============================================================

#[test]
fn user_message_prefers_backend_declared_text() {
    let err = AuthError::Api(ApiError::Http { status: 400, message: "Too short".to_owned() });
    assert_eq!(err.user_message(), "Too short");
}

#[test]
fn user_message_explains_network_failures() {
    let err = AuthError::Api(ApiError::Network);
    assert_eq!(
        err.user_message(),
        "Unable to reach the server. Please check your connection."
    );
}

#[test]
fn user_message_falls_back_for_unknown_failures() {
    let err = AuthError::Api(ApiError::Unknown("bad json".to_owned()));
    assert_eq!(err.user_message(), "Something went wrong. Please try again.");
}

#[test]
fn validation_messages_pass_through_verbatim() {
    let err = AuthError::Validation("Passwords do not match.".to_owned());
    assert_eq!(err.user_message(), "Passwords do not match.");
}
