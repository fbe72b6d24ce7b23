//! World history use cases.

use std::sync::Arc;

use wayfarer_domain::WorldHistoryEntry;

use crate::entities::History;
use crate::infrastructure::ports::RepoError;

/// Entries returned when the caller gives no limit.
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;
/// Upper bound on entries per request.
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Container for history use cases.
pub struct HistoryUseCases {
    pub list_recent: Arc<ListRecentHistory>,
}

impl HistoryUseCases {
    pub fn new(list_recent: Arc<ListRecentHistory>) -> Self {
        Self { list_recent }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("limit must be an integer, got '{0}'")]
    InvalidLimit(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Resolve a raw `limit` parameter.
///
/// Absent or blank means [`DEFAULT_HISTORY_LIMIT`]. Anything that is not an
/// integer is rejected. Integers are clamped into `1..=MAX_HISTORY_LIMIT`.
pub fn resolve_limit(raw: Option<&str>) -> Result<u32, HistoryError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(DEFAULT_HISTORY_LIMIT);
    };
    let requested = raw
        .parse::<i64>()
        .map_err(|_| HistoryError::InvalidLimit(raw.to_string()))?;
    Ok(clamp_limit(requested))
}

pub fn clamp_limit(requested: i64) -> u32 {
    requested.clamp(1, i64::from(MAX_HISTORY_LIMIT)) as u32
}

/// Reads the newest entries of the world history log.
pub struct ListRecentHistory {
    history: Arc<History>,
}

impl ListRecentHistory {
    pub fn new(history: Arc<History>) -> Self {
        Self { history }
    }

    /// Newest entries first; `raw_limit` is the caller's unparsed limit.
    pub async fn execute(
        &self,
        raw_limit: Option<&str>,
    ) -> Result<Vec<WorldHistoryEntry>, HistoryError> {
        let limit = resolve_limit(raw_limit)?;
        let entries = self.history.recent(limit).await?;
        tracing::debug!(limit, returned = entries.len(), "Listed world history");
        Ok(entries)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{history_rows, history_store};
    use super::*;
    use crate::infrastructure::ports::MockTableStore;

    fn use_case(store: MockTableStore) -> ListRecentHistory {
        ListRecentHistory::new(Arc::new(History::new(Arc::new(store))))
    }

    #[test]
    fn limit_resolution() {
        assert_eq!(resolve_limit(None).unwrap(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(resolve_limit(Some("")).unwrap(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(resolve_limit(Some("5")).unwrap(), 5);
        assert_eq!(resolve_limit(Some(" 7 ")).unwrap(), 7);
        assert_eq!(resolve_limit(Some("0")).unwrap(), 1);
        assert_eq!(resolve_limit(Some("-3")).unwrap(), 1);
        assert_eq!(resolve_limit(Some("5000")).unwrap(), MAX_HISTORY_LIMIT);
        assert!(matches!(
            resolve_limit(Some("ten")),
            Err(HistoryError::InvalidLimit(ref raw)) if raw == "ten"
        ));
        assert!(matches!(
            resolve_limit(Some("2.5")),
            Err(HistoryError::InvalidLimit(_))
        ));
    }

    #[tokio::test]
    async fn returns_exactly_limit_entries_newest_first() {
        let entries = use_case(history_store(history_rows(100)))
            .execute(Some("5"))
            .await
            .unwrap();

        assert_eq!(entries.len(), 5);
        assert!(entries
            .windows(2)
            .all(|pair| pair[0].occured_at > pair[1].occured_at));
        assert_eq!(entries[0].id, wayfarer_domain::RecordId::Int(99));
    }

    #[tokio::test]
    async fn defaults_to_twenty_entries() {
        let entries = use_case(history_store(history_rows(100)))
            .execute(None)
            .await
            .unwrap();
        assert_eq!(entries.len(), 20);
    }

    #[tokio::test]
    async fn invalid_limit_never_queries_the_store() {
        let mut store = MockTableStore::new();
        store.expect_select().times(0);

        let err = use_case(store).execute(Some("abc")).await.unwrap_err();
        assert!(matches!(err, HistoryError::InvalidLimit(_)));
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let mut store = MockTableStore::new();
        store
            .expect_select()
            .returning(|_| Err(RepoError::database("select", "connection refused")));

        let err = use_case(store).execute(None).await.unwrap_err();
        assert!(matches!(err, HistoryError::Repo(RepoError::Database { .. })));
    }
}
