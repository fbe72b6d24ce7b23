//! Generic one-query runner.

use std::sync::Arc;

use super::Report;
use crate::infrastructure::ports::{RepoError, TablePatch, TableQuery, TableStore};

/// Issues exactly one read or write and reports the raw rows.
pub struct RunQuery {
    store: Arc<dyn TableStore>,
}

impl RunQuery {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn read(&self, query: &TableQuery) -> Result<Report, RepoError> {
        let rows = self.store.select(query).await?;
        tracing::debug!(table = %query.table, rows = rows.len(), "Query returned");
        Ok(Report::rows(&query.table, rows))
    }

    /// Apply a patch. Matching nothing is reported as zero affected rows.
    pub async fn write(&self, patch: &TablePatch) -> Result<Report, RepoError> {
        let rows = self.store.update(patch).await?;
        if rows.is_empty() {
            tracing::warn!(table = %patch.table, "Update matched no rows");
        }
        Ok(Report::updated(&patch.table, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockTableStore;
    use serde_json::json;

    #[tokio::test]
    async fn empty_read_is_success() {
        let mut store = MockTableStore::new();
        store.expect_select().times(1).returning(|_| Ok(Vec::new()));

        let report = RunQuery::new(Arc::new(store))
            .read(&TableQuery::on("locations").eq("type", "dungeon"))
            .await
            .unwrap();

        assert_eq!(report, Report::rows("locations", Vec::new()));
    }

    #[tokio::test]
    async fn single_row_mismatch_is_surfaced() {
        let mut store = MockTableStore::new();
        store
            .expect_select()
            .withf(|q| q.expect_single)
            .returning(|q| {
                Err(RepoError::Query {
                    table: q.table.clone(),
                    status: 406,
                    code: Some("PGRST116".into()),
                    message: "JSON object requested, multiple (or no) rows returned".into(),
                    details: None,
                    hint: None,
                })
            });

        let err = RunQuery::new(Arc::new(store))
            .read(&TableQuery::on("npcs").eq("slug", "ghost").single())
            .await
            .unwrap_err();

        assert_eq!(err.store_code(), Some("PGRST116"));
    }

    #[tokio::test]
    async fn write_reports_affected_rows() {
        let mut store = MockTableStore::new();
        store
            .expect_update()
            .returning(|_| Ok(vec![json!({"slug": "smith", "image": "/a.png"})]));

        let report = RunQuery::new(Arc::new(store))
            .write(&TablePatch::new("npcs").set("image", "/a.png").eq("slug", "smith"))
            .await
            .unwrap();

        assert!(matches!(report, Report::Updated { affected: 1, .. }));
    }
}
