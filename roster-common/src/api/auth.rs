//! Admin authentication via signed, expiring tokens
//!
//! # Token format
//!
//! `base64url(claims JSON) "." sha256_hex(payload + secret)`, where `payload`
//! is the base64url segment. Claims carry the subject, an admin flag and the
//! issue/expiry times in Unix seconds.
//!
//! Every failure collapses to `InvalidCredentials` or `InvalidToken`; callers
//! never learn which credential was wrong or why a token was rejected.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

// ========================================
// Error Types
// ========================================

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,
}

// ========================================
// Values
// ========================================

/// Username/password pair submitted at login
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identity carried by a valid token
///
/// Produced per request by the auth layer and handed to protected handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub admin: bool,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
}

/// Opaque bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// ========================================
// Gate
// ========================================

/// Verifies the configured admin credentials and issues/validates tokens
#[derive(Clone)]
pub struct AuthGate {
    username: String,
    password: String,
    secret: String,
    lifetime_secs: i64,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("username", &self.username)
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}

impl AuthGate {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        secret: impl Into<String>,
        lifetime_secs: u64,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            secret: secret.into(),
            lifetime_secs: i64::try_from(lifetime_secs).unwrap_or(i64::MAX),
        }
    }

    /// False when no admin password is configured; every login then fails
    pub fn login_enabled(&self) -> bool {
        !self.password.is_empty()
    }

    /// Check credentials and issue a token valid from now
    pub fn verify(&self, credentials: &Credentials) -> Result<Token, AuthError> {
        self.verify_at(credentials, now_secs())
    }

    pub fn verify_at(&self, credentials: &Credentials, now: i64) -> Result<Token, AuthError> {
        // Evaluate both comparisons so timing does not reveal which one failed
        let user_ok = constant_time_eq(credentials.username.as_bytes(), self.username.as_bytes());
        let pass_ok = constant_time_eq(credentials.password.as_bytes(), self.password.as_bytes());

        if !self.login_enabled() || !(user_ok & pass_ok) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(self.issue_at(&credentials.username, now))
    }

    /// Issue an admin token for `sub` without checking credentials
    pub fn issue_at(&self, sub: &str, now: i64) -> Token {
        let claims = serde_json::json!({
            "sub": sub,
            "admin": true,
            "iat": now,
            "exp": now.saturating_add(self.lifetime_secs),
        });
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        let signature = sign(&payload, &self.secret);
        Token(format!("{payload}.{signature}"))
    }

    /// Validate a token against the current time
    pub fn authorize(&self, token: &str) -> Result<AdminClaims, AuthError> {
        self.authorize_at(token, now_secs())
    }

    pub fn authorize_at(&self, token: &str, now: i64) -> Result<AdminClaims, AuthError> {
        let (payload, signature) = token.split_once('.').ok_or(AuthError::InvalidToken)?;

        let expected = sign(payload, &self.secret);
        if !constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
            return Err(AuthError::InvalidToken);
        }

        let json = URL_SAFE_NO_PAD.decode(payload).map_err(|_| AuthError::InvalidToken)?;
        let claims: AdminClaims = serde_json::from_slice(&json).map_err(|_| AuthError::InvalidToken)?;

        if !claims.admin || now >= claims.exp {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }
}

/// SHA-256 of `payload + secret`, lowercase hex
pub fn sign(payload: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
