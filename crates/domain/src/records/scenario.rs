//! Scenario (quest) record.

use serde::{Deserialize, Serialize};

use super::StoreRecord;
use crate::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: RecordId,
    pub title: String,
    /// Quest category (e.g. "main", "side", "daily").
    #[serde(default)]
    pub quest_type: Option<String>,
}

impl StoreRecord for Scenario {
    const TABLE: &'static str = "scenarios";
    const ENTITY: &'static str = "Scenario";
}
