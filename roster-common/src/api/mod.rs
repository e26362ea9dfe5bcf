//! API support shared with the HTTP service
//!
//! Contains only pure functions; HTTP framework glue lives in roster-admin.

pub mod auth;

pub use auth::{AdminClaims, AuthError, AuthGate, Credentials, Token};
