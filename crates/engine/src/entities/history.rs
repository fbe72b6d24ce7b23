//! World history log operations.

use std::sync::Arc;
use wayfarer_domain::{StoreRecord, WorldHistoryEntry, OCCURED_AT};

use super::fetch_all;
use crate::infrastructure::ports::{RepoError, SortDirection, TableQuery, TableStore};

pub struct History {
    store: Arc<dyn TableStore>,
}

impl History {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// The newest `limit` entries, newest first.
    pub async fn recent(&self, limit: u32) -> Result<Vec<WorldHistoryEntry>, RepoError> {
        let query = TableQuery::on(WorldHistoryEntry::TABLE)
            .order_by(OCCURED_AT, SortDirection::Descending)
            .limit(limit);
        fetch_all(self.store.as_ref(), &query).await
    }
}
