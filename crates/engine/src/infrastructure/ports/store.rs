//! World-store port.

use async_trait::async_trait;
use serde_json::Value;

use super::error::RepoError;
use super::query::{TablePatch, TableQuery};

/// One-request access to the world store's tables.
///
/// Every call is exactly one round trip. Nothing is cached or retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Run a read. Zero matching rows is an empty vec, not an error.
    ///
    /// With `expect_single` set, the store itself rejects zero or many
    /// matches and that rejection is returned as the error.
    async fn select(&self, query: &TableQuery) -> Result<Vec<Value>, RepoError>;

    /// Apply a patch and return the rows it changed.
    async fn update(&self, patch: &TablePatch) -> Result<Vec<Value>, RepoError>;
}
