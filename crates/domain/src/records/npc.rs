//! NPC record.

use serde::{Deserialize, Serialize};

use super::StoreRecord;
use crate::NpcSlug;

/// A non-player character row from `npcs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub slug: NpcSlug,
    pub name: String,
    /// Public path of the portrait image, relative to the asset root.
    #[serde(default)]
    pub image: Option<String>,
}

impl StoreRecord for Npc {
    const TABLE: &'static str = "npcs";
    const ENTITY: &'static str = "Npc";
}
