//! Table view and facet options

use axum::{extract::State, Json};
use roster_common::pagination::{calculate_pagination, Page};
use roster_common::query::{self, FacetOptions, FilterSpec, SortSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::records::RecordResponse;
use crate::error::ApiResult;
use crate::AppState;

/// View request; every field is optional
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ViewRequest {
    pub filter: FilterSpec,
    pub sort: SortSpec,
    /// Requested page (1-indexed)
    pub page: usize,
}

impl Default for ViewRequest {
    fn default() -> Self {
        Self {
            filter: FilterSpec::default(),
            sort: SortSpec::default(),
            page: 1,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub records: Vec<RecordResponse>,
    pub total_filtered: usize,
    pub total_pages: usize,
    /// Page actually returned, after clamping
    pub page: usize,
    pub page_size: usize,
}

/// POST /api/records/view
///
/// Unlike the query engine, this endpoint clamps the requested page into
/// `[1, total_pages]` so a client never receives an empty page while
/// matching records exist.
pub async fn view_records(
    State(state): State<AppState>,
    Json(request): Json<ViewRequest>,
) -> ApiResult<Json<ViewResponse>> {
    let records = state.records().await?;
    let size = state.page_size;

    let mut result = query::view(&records, &request.filter, &request.sort, Page::with_size(request.page, size));
    let pagination = calculate_pagination(result.total_filtered, request.page, size);
    if pagination.page != request.page {
        debug!(requested = request.page, effective = pagination.page, "Clamped view page");
        result = query::view(&records, &request.filter, &request.sort, Page::with_size(pagination.page, size));
    }

    Ok(Json(ViewResponse {
        records: result.visible.iter().map(RecordResponse::from).collect(),
        total_filtered: result.total_filtered,
        total_pages: result.total_pages,
        page: pagination.page,
        page_size: size,
    }))
}

/// GET /api/records/options
pub async fn get_options(State(state): State<AppState>) -> ApiResult<Json<FacetOptions>> {
    let records = state.records().await?;
    Ok(Json(query::options(&records)))
}
