//! Player-side records: profiles and party membership.
//!
//! Both tables are read whole; only the key is modelled.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::StoreRecord;
use crate::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: RecordId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoreRecord for UserProfile {
    const TABLE: &'static str = "user_profiles";
    const ENTITY: &'static str = "UserProfile";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyMember {
    pub id: RecordId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoreRecord for PartyMember {
    const TABLE: &'static str = "party_members";
    const ENTITY: &'static str = "PartyMember";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::decode_row;
    use serde_json::json;

    #[test]
    fn unmodelled_columns_are_kept() {
        let member: PartyMember = decode_row(json!({
            "id": 3,
            "profile_id": "u-1",
            "role": "healer"
        }))
        .unwrap();

        assert_eq!(member.id, RecordId::Int(3));
        assert_eq!(member.extra.get("role"), Some(&json!("healer")));
        assert!(!member.extra.contains_key("id"));
    }
}
