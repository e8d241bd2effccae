//! Per-date snapshot payloads.
//!
//! A [`Snapshot`] is everything that varies with the selected date: the front
//! line, unit positions and points of interest. Every field defaults to empty
//! so a sparse document still yields a renderable snapshot. Malformed entries
//! are dropped one by one; only a document that is not an object fails.

use crate::core::{
    manifest::{Coordinate, CoordinateList, UnitId},
    side::BySide,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A single polyline or a list of polylines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontLine {
    Single(CoordinateList),
    Multi(Vec<CoordinateList>),
}

impl Default for FrontLine {
    fn default() -> Self {
        FrontLine::Single(Vec::new())
    }
}

impl FrontLine {
    pub fn point_count(&self) -> usize {
        match self {
            FrontLine::Single(line) => line.len(),
            FrontLine::Multi(lines) => lines.iter().map(Vec::len).sum(),
        }
    }
}

/// `[unit_id, [x, y]]`
pub type UnitPosition = (UnitId, Coordinate);

/// A point of interest: coordinate plus free-text description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLoc {
    #[serde(rename = "c")]
    pub coordinate: Coordinate,
    #[serde(rename = "d", default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient_frontline")]
    pub frontline: FrontLine,
    #[serde(default, deserialize_with = "lenient_units")]
    pub units: BySide<Vec<UnitPosition>>,
    /// Keyed by side tag; tags other than `ua`/`ru` are carried but not rendered
    #[serde(default, deserialize_with = "lenient_geos")]
    pub geos: HashMap<String, Vec<GeoLoc>>,
    #[serde(
        default,
        deserialize_with = "lenient_unit_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_count: Option<BySide<u32>>,
}

/// Keep the entries of a JSON array that parse as `T`; anything else is empty
fn well_formed<T: DeserializeOwned>(entries: Option<&Value>, what: &str) -> Vec<T> {
    let Some(entries) = entries.and_then(Value::as_array) else {
        return Vec::new();
    };
    let kept: Vec<T> = entries
        .iter()
        .filter_map(|entry| T::deserialize(entry).ok())
        .collect();
    if kept.len() < entries.len() {
        log::debug!("Skipped {} malformed {what} entries", entries.len() - kept.len());
    }
    kept
}

fn lenient_frontline<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FrontLine, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(FrontLine::deserialize(&value).unwrap_or_else(|e| {
        log::debug!("Ignoring malformed front line: {e}");
        FrontLine::default()
    }))
}

fn lenient_units<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BySide<Vec<UnitPosition>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(BySide::from_fn(|side| well_formed(value.get(side.as_str()), "unit")))
}

fn lenient_geos<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<HashMap<String, Vec<GeoLoc>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Some(tags) = value.as_object() else {
        return Ok(HashMap::new());
    };
    Ok(tags
        .iter()
        .filter(|(_, entries)| entries.is_array())
        .map(|(tag, entries)| (tag.clone(), well_formed(Some(entries), "geo")))
        .collect())
}

fn lenient_unit_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<BySide<u32>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(Option::<BySide<u32>>::deserialize(&value).ok().flatten())
}

impl Snapshot {
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn total_units(&self) -> usize {
        self.units.ua.len() + self.units.ru.len()
    }

    pub fn total_geos(&self) -> usize {
        self.geos.values().map(Vec::len).sum()
    }
}
