//! Location record - a node on the travel map.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StoreRecord;
use crate::{LocationSlug, RecordId};

/// A location row from `locations`.
///
/// `x`/`y` are world coordinates; `map_x`/`map_y` place the marker on the
/// rendered map image. Either pair may be unset for locations that have not
/// been placed yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: RecordId,
    pub slug: LocationSlug,
    pub name: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub map_x: Option<f64>,
    #[serde(default)]
    pub map_y: Option<f64>,
    /// Adjacent locations. Older rows store slugs, newer rows store ids.
    #[serde(default)]
    pub neighbors: Option<Vec<Value>>,
    #[serde(rename = "type", default)]
    pub location_type: Option<String>,
}

/// A placed map coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl Location {
    /// World coordinates, when both are set.
    pub fn world_point(&self) -> Option<MapPoint> {
        Some(MapPoint {
            x: self.x?,
            y: self.y?,
        })
    }

    /// Map-image coordinates, when both are set.
    pub fn map_point(&self) -> Option<MapPoint> {
        Some(MapPoint {
            x: self.map_x?,
            y: self.map_y?,
        })
    }

    /// Neighbor references rendered as text, whatever shape the row used.
    pub fn neighbor_keys(&self) -> Vec<String> {
        self.neighbors
            .iter()
            .flatten()
            .filter_map(|n| match n {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()
    }
}

impl StoreRecord for Location {
    const TABLE: &'static str = "locations";
    const ENTITY: &'static str = "Location";
}
