//! # Roster Common Library
//!
//! Shared code for the Roster admin service including:
//! - Person record model
//! - Query engine (filter, sort, paginate, facet options)
//! - Batch import pipeline (CSV parse + field validation)
//! - Statistics aggregation
//! - Admin token issuing and verification
//! - Configuration loading
//! - Database initialization and the SQLite record store

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod model;
pub mod pagination;
pub mod query;
pub mod stats;

pub use error::{Error, Result};
pub use model::{Person, Record, RecordId};
