use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::StoreRecord;
use crate::RecordId;

/// A nation row from `nations`, read whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nation {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoreRecord for Nation {
    const TABLE: &'static str = "nations";
    const ENTITY: &'static str = "Nation";
}
