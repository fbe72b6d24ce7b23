//! Nation entity operations.

use std::sync::Arc;
use wayfarer_domain::{self as domain, StoreRecord};

use super::fetch_all;
use crate::infrastructure::ports::{RepoError, TableQuery, TableStore};

pub struct Nation {
    store: Arc<dyn TableStore>,
}

impl Nation {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<domain::Nation>, RepoError> {
        fetch_all(self.store.as_ref(), &TableQuery::on(domain::Nation::TABLE)).await
    }
}
