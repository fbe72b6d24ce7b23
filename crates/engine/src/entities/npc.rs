//! NPC entity operations.

use std::sync::Arc;
use wayfarer_domain::{self as domain, decode_rows, DomainError, NpcSlug, StoreRecord};

use super::{fetch_all, fetch_one};
use crate::infrastructure::ports::{RepoError, SortDirection, TablePatch, TableQuery, TableStore};

pub struct Npc {
    store: Arc<dyn TableStore>,
}

/// Result of patching an NPC's portrait.
///
/// The store reports success whether or not the slug matched anything, so
/// the changed rows are returned and counted.
#[derive(Debug, Clone)]
pub struct NpcImageUpdate {
    pub updated: Vec<domain::Npc>,
}

impl NpcImageUpdate {
    pub fn affected(&self) -> usize {
        self.updated.len()
    }
}

impl Npc {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<domain::Npc>, RepoError> {
        let query = TableQuery::on(domain::Npc::TABLE).order_by("name", SortDirection::Ascending);
        fetch_all(self.store.as_ref(), &query).await
    }

    pub async fn get_by_slug(&self, slug: &NpcSlug) -> Result<domain::Npc, RepoError> {
        let query = TableQuery::on(domain::Npc::TABLE).eq("slug", slug).single();
        fetch_one(self.store.as_ref(), &query).await
    }

    /// Point an NPC's `image` at a new asset path.
    pub async fn set_image(&self, slug: &NpcSlug, image: &str) -> Result<NpcImageUpdate, RepoError> {
        if slug.as_str().trim().is_empty() {
            return Err(DomainError::validation("NPC slug cannot be empty").into());
        }

        let patch = TablePatch::new(domain::Npc::TABLE)
            .set("image", image)
            .eq("slug", slug);
        let rows = self.store.update(&patch).await?;
        let updated = decode_rows::<domain::Npc>(rows)?;

        if updated.is_empty() {
            tracing::warn!(slug = %slug, "NPC image update matched no rows");
        } else {
            tracing::info!(slug = %slug, image, affected = updated.len(), "Updated NPC image");
        }

        Ok(NpcImageUpdate { updated })
    }
}
