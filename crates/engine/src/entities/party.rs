//! Player profile and party membership operations.

use std::sync::Arc;
use wayfarer_domain::{PartyMember, StoreRecord, UserProfile};

use super::fetch_all;
use crate::infrastructure::ports::{RepoError, TableQuery, TableStore};

pub struct Party {
    store: Arc<dyn TableStore>,
}

impl Party {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn list_profiles(&self) -> Result<Vec<UserProfile>, RepoError> {
        fetch_all(self.store.as_ref(), &TableQuery::on(UserProfile::TABLE)).await
    }

    pub async fn list_members(&self) -> Result<Vec<PartyMember>, RepoError> {
        fetch_all(self.store.as_ref(), &TableQuery::on(PartyMember::TABLE)).await
    }
}
