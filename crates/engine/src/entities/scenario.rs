//! Scenario (quest) entity operations.

use std::sync::Arc;
use wayfarer_domain::{self as domain, StoreRecord};

use super::fetch_all;
use crate::infrastructure::ports::{RepoError, SortDirection, TableQuery, TableStore};

pub struct Scenario {
    store: Arc<dyn TableStore>,
}

impl Scenario {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Scenarios by id, optionally only those of the given quest types.
    pub async fn list(&self, quest_types: &[String]) -> Result<Vec<domain::Scenario>, RepoError> {
        let mut query = TableQuery::on(domain::Scenario::TABLE)
            .columns(["id", "title", "quest_type"])
            .order_by("id", SortDirection::Ascending);
        if !quest_types.is_empty() {
            query = query.within("quest_type", quest_types);
        }
        fetch_all(self.store.as_ref(), &query).await
    }
}
