//! Wayfarer domain types.
//!
//! Typed records for the world store's tables, their identifiers, and the
//! parsers the engine and tools share. No I/O happens in this crate.

pub mod error;
pub mod ids;
pub mod params;
pub mod records;
pub mod timestamp;

pub use error::DomainError;

pub use ids::{LocationSlug, NpcSlug, RecordId};

pub use params::{parse_params, ParamMap};

pub use records::{
    decode_row, decode_rows, Item, Location, MapPoint, Nation, Npc, PartyMember, Scenario,
    StoreRecord, UserProfile, WorldHistoryEntry, OCCURED_AT,
};

pub use timestamp::parse_store_timestamp;
