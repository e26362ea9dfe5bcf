//! Admin login and the Bearer token middleware
//!
//! The middleware turns a valid token into an `AdminClaims` request
//! extension; protected handlers read the acting admin from there.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use roster_common::api::Credentials;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppState;

/// Login response
///
/// `token` is omitted on failure.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub message: String,
}

/// POST /api/admin/login
pub async fn login(State(state): State<AppState>, Json(credentials): Json<Credentials>) -> Response {
    match state.auth.verify(&credentials) {
        Ok(token) => {
            info!(user = %credentials.username, "Admin login succeeded");
            Json(LoginResponse {
                success: true,
                token: Some(token.into_string()),
                message: "Login successful".to_string(),
            })
            .into_response()
        }
        Err(_) => {
            warn!("Admin login rejected");
            (
                StatusCode::UNAUTHORIZED,
                Json(LoginResponse {
                    success: false,
                    token: None,
                    message: "Invalid credentials".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Authentication middleware
///
/// Requires `Authorization: Bearer <token>`. Returns 401 when the header is
/// missing, uses another scheme, or carries a token that does not verify.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            warn!(path = %request.uri().path(), "Missing bearer token");
            ApiError::Unauthorized("Missing bearer token".to_string())
        })?;

    let claims = state.auth.authorize(token).map_err(|e| {
        warn!(path = %request.uri().path(), "Rejected bearer token");
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
