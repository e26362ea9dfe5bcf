//! roster-admin library - person record admin service
//!
//! Public routes browse, filter and summarize the record table; protected
//! routes (Bearer token from `/api/admin/login`) create, import and delete.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use roster_common::api::AuthGate;
use roster_common::cache::RecordCache;
use roster_common::db::RecordStore;
use roster_common::import::RecordValidator;
use roster_common::model::Record;
use roster_common::pagination::PAGE_SIZE;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;

/// Default request body limit (10 MB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    /// Full record set, reloaded after every mutation
    pub cache: RecordCache,
    pub auth: Arc<AuthGate>,
    pub validator: Arc<RecordValidator>,
    pub page_size: usize,
    pub max_body_bytes: usize,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn RecordStore>, auth: AuthGate, validator: RecordValidator) -> Self {
        Self {
            store,
            cache: RecordCache::new(),
            auth: Arc::new(auth),
            validator: Arc::new(validator),
            page_size: PAGE_SIZE,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Cached full record set
    pub async fn records(&self) -> roster_common::Result<Arc<Vec<Record>>> {
        self.cache.get_or_load(self.store.as_ref()).await
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (require an admin token)
    let protected = Router::new()
        .route("/api/records", post(api::create_record))
        .route("/api/records/batch", post(api::import_batch))
        .route("/api/records/batch/validate", post(api::validate_batch))
        .route("/api/records/delete", post(api::delete_records))
        .layer(middleware::from_fn_with_state(state.clone(), api::auth_middleware));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/api/admin/login", post(api::login))
        .route("/api/records", get(api::list_records))
        .route("/api/records/view", post(api::view_records))
        .route("/api/records/options", get(api::get_options))
        .route("/api/stats", get(api::get_stats))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
