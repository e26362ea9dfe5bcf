//! Database initialization and the SQLite-backed record store

pub mod init;
pub mod records;
pub mod settings;

pub use init::*;
pub use records::{RecordStore, SqliteRecordStore};
