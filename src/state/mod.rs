//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` owns the authentication state machine; `storage` is its
//! durable credential cache; `validate` holds the client-local form checks
//! that run before a network call is attempted.

pub mod session;
pub mod storage;
pub mod validate;
