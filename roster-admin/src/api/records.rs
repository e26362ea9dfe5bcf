//! Record listing, single create and delete

use axum::{extract::State, http::StatusCode, Extension, Json};
use roster_common::api::AdminClaims;
use roster_common::model::{Person, Record, RecordId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Record as shown in the table
///
/// `name` is the display name; absent optional fields serialize as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse {
    pub id: RecordId,
    pub name: String,
    #[serde(flatten)]
    pub person: Person,
}

impl From<&Record> for RecordResponse {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id,
            name: record.display_name(),
            person: record.person.clone(),
        }
    }
}

/// GET /api/records
pub async fn list_records(State(state): State<AppState>) -> ApiResult<Json<Vec<RecordResponse>>> {
    let records = state.records().await?;
    Ok(Json(records.iter().map(RecordResponse::from).collect()))
}

/// POST /api/records
///
/// Validates with the same rules as a batch row (reported as row 1).
pub async fn create_record(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Json(person): Json<Person>,
) -> ApiResult<(StatusCode, Json<RecordResponse>)> {
    let person = person.normalized();
    let errors = state.validator.check(1, &person);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let record = state.store.insert_one(person).await?;
    state.cache.invalidate().await;

    info!(admin = %admin.sub, id = %record.id, "Created record");
    Ok((StatusCode::CREATED, Json(RecordResponse::from(&record))))
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: usize,
}

/// POST /api/records/delete
pub async fn delete_records(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Json(request): Json<DeleteRequest>,
) -> ApiResult<Json<DeleteResponse>> {
    if request.ids.is_empty() {
        return Err(ApiError::BadRequest("No record ids given".to_string()));
    }

    let ids = request
        .ids
        .iter()
        .map(|id| {
            id.parse::<RecordId>()
                .map_err(|_| ApiError::BadRequest(format!("Invalid record id: {id}")))
        })
        .collect::<ApiResult<Vec<_>>>()?;

    let deleted = state.store.delete_by_ids(&ids).await?;
    state.cache.invalidate().await;

    info!(admin = %admin.sub, requested = ids.len(), deleted, "Deleted records");
    Ok(Json(DeleteResponse { deleted }))
}
