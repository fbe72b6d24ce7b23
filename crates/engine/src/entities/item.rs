//! Item entity operations.

use std::sync::Arc;
use wayfarer_domain::{self as domain, StoreRecord};

use super::fetch_all;
use crate::infrastructure::ports::{RepoError, SortDirection, TableQuery, TableStore};

pub struct Item {
    store: Arc<dyn TableStore>,
}

impl Item {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<domain::Item>, RepoError> {
        let query = TableQuery::on(domain::Item::TABLE).order_by("name", SortDirection::Ascending);
        fetch_all(self.store.as_ref(), &query).await
    }

    /// Items whose `type` column matches.
    ///
    /// Rows still on the legacy `item_type` column are not matched here; the
    /// store cannot filter on a column that only some rows populate.
    pub async fn list_by_type(&self, item_type: &str) -> Result<Vec<domain::Item>, RepoError> {
        let query = TableQuery::on(domain::Item::TABLE)
            .eq("type", item_type)
            .order_by("name", SortDirection::Ascending);
        fetch_all(self.store.as_ref(), &query).await
    }

    /// Items whose name contains `fragment`, case-insensitively.
    pub async fn search(&self, fragment: &str) -> Result<Vec<domain::Item>, RepoError> {
        let query = TableQuery::on(domain::Item::TABLE)
            .ilike("name", format!("*{fragment}*"))
            .order_by("name", SortDirection::Ascending);
        fetch_all(self.store.as_ref(), &query).await
    }
}
