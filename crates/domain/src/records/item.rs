//! Item record.
//!
//! The `items` table went through a rename: older rows carry `price` and
//! `item_type`, newer ones `base_price` and `type`. Both spellings decode and
//! the accessors prefer the newer column.

use serde::{Deserialize, Serialize};

use super::StoreRecord;
use crate::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

impl Item {
    pub fn effective_price(&self) -> Option<f64> {
        self.base_price.or(self.price)
    }

    pub fn effective_type(&self) -> Option<&str> {
        self.kind.as_deref().or(self.item_type.as_deref())
    }
}

impl StoreRecord for Item {
    const TABLE: &'static str = "items";
    const ENTITY: &'static str = "Item";
}
