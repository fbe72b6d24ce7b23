//! Location entity operations.

use std::sync::Arc;
use wayfarer_domain::{self as domain, LocationSlug, StoreRecord};

use super::{fetch_all, fetch_one};
use crate::infrastructure::ports::{RepoError, SortDirection, TableQuery, TableStore};

/// Location entity operations.
pub struct Location {
    store: Arc<dyn TableStore>,
}

impl Location {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// All locations, by name.
    pub async fn list(&self) -> Result<Vec<domain::Location>, RepoError> {
        let query = TableQuery::on(domain::Location::TABLE).order_by("name", SortDirection::Ascending);
        fetch_all(self.store.as_ref(), &query).await
    }

    /// Locations of one type (e.g. "town", "dungeon"), by name.
    pub async fn list_by_type(&self, location_type: &str) -> Result<Vec<domain::Location>, RepoError> {
        let query = TableQuery::on(domain::Location::TABLE)
            .eq("type", location_type)
            .order_by("name", SortDirection::Ascending);
        fetch_all(self.store.as_ref(), &query).await
    }

    /// The one location with this slug; the store rejects zero or many.
    pub async fn get_by_slug(&self, slug: &LocationSlug) -> Result<domain::Location, RepoError> {
        let query = TableQuery::on(domain::Location::TABLE)
            .eq("slug", slug)
            .single();
        fetch_one(self.store.as_ref(), &query).await
    }
}
