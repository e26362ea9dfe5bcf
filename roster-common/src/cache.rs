//! Record cache
//!
//! Holds the full record set between mutations. The first read loads it from
//! the store; every mutation calls `invalidate`, and the next read reloads
//! the whole set.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::db::RecordStore;
use crate::model::Record;
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct RecordCache {
    records: Arc<RwLock<Option<Arc<Vec<Record>>>>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached records, loading from `store` when empty
    pub async fn get_or_load(&self, store: &dyn RecordStore) -> Result<Arc<Vec<Record>>> {
        if let Some(records) = self.records.read().await.as_ref() {
            return Ok(Arc::clone(records));
        }

        let mut slot = self.records.write().await;
        // Another request may have loaded while we waited for the write lock
        if let Some(records) = slot.as_ref() {
            return Ok(Arc::clone(records));
        }

        let records = Arc::new(store.find_all().await?);
        debug!(count = records.len(), "Loaded record cache");
        *slot = Some(Arc::clone(&records));
        Ok(records)
    }

    /// Drop the cached set; the next read reloads it
    pub async fn invalidate(&self) {
        *self.records.write().await = None;
        debug!("Invalidated record cache");
    }

    pub async fn is_loaded(&self) -> bool {
        self.records.read().await.is_some()
    }
}
