//! World history log entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::StoreRecord;
use crate::timestamp::store_timestamp;
use crate::RecordId;

/// One entry of the append-only `world_history` log.
///
/// The column really is spelled `occured_at` in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldHistoryEntry {
    pub id: RecordId,
    #[serde(with = "store_timestamp")]
    pub occured_at: DateTime<Utc>,
    /// Event payload columns (title, description, nation references, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoreRecord for WorldHistoryEntry {
    const TABLE: &'static str = "world_history";
    const ENTITY: &'static str = "WorldHistoryEntry";
}

/// Column the log is ordered by.
pub const OCCURED_AT: &str = "occured_at";
