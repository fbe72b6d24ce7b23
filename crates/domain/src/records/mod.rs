//! Typed records for the world store's tables.
//!
//! The store owns the schema; these types describe what the game reads from
//! it. Rows are decoded at the data-access boundary so use sites never inspect
//! free-form maps for field presence. Columns that are not modelled are kept
//! in `extra` where a table is read whole.

mod history;
mod item;
mod location;
mod nation;
mod npc;
mod party;
mod scenario;

pub use history::{WorldHistoryEntry, OCCURED_AT};
pub use item::Item;
pub use location::{Location, MapPoint};
pub use nation::Nation;
pub use npc::Npc;
pub use party::{PartyMember, UserProfile};
pub use scenario::Scenario;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::DomainError;

/// A record type backed by one store table.
pub trait StoreRecord: DeserializeOwned {
    /// Table name in the store.
    const TABLE: &'static str;
    /// Name used in error messages.
    const ENTITY: &'static str;
}

/// Decode one store row into a record.
pub fn decode_row<T: StoreRecord>(row: Value) -> Result<T, DomainError> {
    serde_json::from_value(row).map_err(|e| DomainError::decode(T::ENTITY, e))
}

/// Decode a batch of rows, failing on the first row that does not fit.
pub fn decode_rows<T: StoreRecord>(rows: Vec<Value>) -> Result<Vec<T>, DomainError> {
    rows.into_iter().map(decode_row::<T>).collect()
}
