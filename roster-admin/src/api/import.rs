//! Batch import endpoints
//!
//! Both take the raw delimited text as the request body. A structural
//! problem is a 400; field problems are collected and returned together.

use axum::{extract::State, http::StatusCode, Extension, Json};
use roster_common::api::AdminClaims;
use roster_common::import::{self, ValidatedBatch};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub inserted: usize,
}

/// POST /api/records/batch/validate
///
/// Dry run: reports what an import would accept without writing anything.
pub async fn validate_batch(State(state): State<AppState>, body: String) -> ApiResult<Json<ValidatedBatch>> {
    let batch = import::parse(&body)?;
    let result = state.validator.validate(&batch);

    info!(
        rows = batch.len(),
        accepted = result.accepted.len(),
        errors = result.errors.len(),
        "Validated import batch"
    );
    Ok(Json(result))
}

/// POST /api/records/batch
///
/// Commits only a fully clean batch, as one atomic insert.
pub async fn import_batch(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    body: String,
) -> ApiResult<(StatusCode, Json<ImportResponse>)> {
    let batch = import::parse(&body)?;
    let result = state.validator.validate(&batch);

    if !result.is_clean() {
        warn!(rows = batch.len(), errors = result.errors.len(), "Import batch rejected");
        return Err(ApiError::Validation(result.errors));
    }

    let inserted = state.store.insert_many(result.accepted).await?;
    state.cache.invalidate().await;

    info!(admin = %admin.sub, inserted, "Imported record batch");
    Ok((StatusCode::CREATED, Json(ImportResponse { inserted })))
}
