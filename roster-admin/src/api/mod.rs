//! HTTP API handlers for roster-admin

pub mod auth;
pub mod buildinfo;
pub mod health;
pub mod import;
pub mod records;
pub mod stats;
pub mod view;

pub use auth::{auth_middleware, login};
pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use import::{import_batch, validate_batch};
pub use records::{create_record, delete_records, list_records, RecordResponse};
pub use stats::get_stats;
pub use view::{get_options, view_records};
