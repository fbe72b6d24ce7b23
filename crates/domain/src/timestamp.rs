//! Timestamp decoding for store columns.
//!
//! `timestamptz` columns come back as RFC 3339 with an offset, while plain
//! `timestamp` columns come back without one. Both are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::DomainError;

/// Parse a timestamp string as returned by the store.
pub fn parse_store_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    // Postgres `timestamp` output, with either 'T' or ' ' separator
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    // Offsets without a colon ("+00") are not RFC 3339
    if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(parsed.with_timezone(&Utc));
    }

    Err(DomainError::parse(format!("Unrecognized timestamp: {raw}")))
}

/// Serde adapter for `DateTime<Utc>` fields backed by store timestamp columns.
pub mod store_timestamp {
    use super::*;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_store_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
