//! Dashboard statistics endpoint

use axum::{extract::State, Json};
use roster_common::stats::{aggregate, RecordStats};

use crate::error::ApiResult;
use crate::AppState;

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<RecordStats>> {
    let records = state.records().await?;
    Ok(Json(aggregate(&records)))
}
