//! Pure transformations from snapshot payloads to renderable features.
//!
//! Every function here is total: unknown unit ids resolve to the fallback
//! identity and unknown side tags are skipped. Output order always follows
//! input order so marker indices line up with the source lists.

use crate::core::{
    geojson::{Feature, FeatureCollection, Geometry, NoProperties},
    manifest::{BaseManifest, CoordinateList},
    side::{BySide, Side},
    snapshot::{FrontLine, GeoLoc, UnitPosition},
};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

lazy_static! {
    static ref URL_PATTERN: Regex = Regex::new(r"((https?://)|(www\.))[^\s|<]+").unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitProperties {
    #[serde(rename = "unitId")]
    pub unit_id: u64,
    #[serde(rename = "unitName")]
    pub name: String,
    #[serde(rename = "unitSide")]
    pub side: Side,
    #[serde(rename = "unitSIDC")]
    pub sidc: String,
    #[serde(rename = "unitSIDCText")]
    pub custom_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointProperties {
    pub description: String,
    pub side: Side,
    pub cls: Side,
}

pub type UnitCollection = FeatureCollection<UnitProperties>;
pub type PointCollection = FeatureCollection<PointProperties>;
pub type LineFeature = Feature<NoProperties>;

/// One collection per side, `None` for a side without units
pub fn transform_units(
    units: &BySide<Vec<UnitPosition>>,
    manifest: &BaseManifest,
) -> BySide<Option<UnitCollection>> {
    BySide::from_fn(|side| {
        let positions = units.get(side);
        if positions.is_empty() {
            return None;
        }
        let features = positions
            .iter()
            .map(|&(unit_id, coordinate)| {
                let unit = manifest.resolve_unit(unit_id);
                Feature::point(
                    coordinate,
                    UnitProperties {
                        unit_id,
                        name: unit.name,
                        side,
                        sidc: unit.sidc,
                        custom_text: unit.custom_text,
                    },
                )
            })
            .collect();
        Some(FeatureCollection::new(features))
    })
}

/// One collection per known side; other tags are ignored
pub fn transform_points(geos: &HashMap<String, Vec<GeoLoc>>) -> BySide<PointCollection> {
    let mut collections = BySide::from_fn(|_| FeatureCollection::new(Vec::new()));
    for (tag, locations) in geos {
        let Some(side) = Side::from_tag(tag) else {
            log::debug!("Skipping {} points with unknown side tag '{tag}'", locations.len());
            continue;
        };
        collections.get_mut(side).features.extend(locations.iter().map(|loc| {
            Feature::point(
                loc.coordinate,
                PointProperties {
                    description: loc.description.clone(),
                    side,
                    cls: side,
                },
            )
        }));
    }
    collections
}

pub fn transform_frontline(frontline: &FrontLine) -> LineFeature {
    let geometry = match frontline {
        FrontLine::Single(line) => Geometry::LineString {
            coordinates: line.clone(),
        },
        FrontLine::Multi(lines) => Geometry::MultiLineString {
            coordinates: lines.clone(),
        },
    };
    Feature {
        geometry,
        properties: NoProperties {},
    }
}

/// Fortification and obstacle lines from the manifest
pub fn transform_static_lines(lines: &[CoordinateList]) -> LineFeature {
    Feature {
        geometry: Geometry::MultiLineString {
            coordinates: lines.to_vec(),
        },
        properties: NoProperties {},
    }
}

/// Popup markup for a point-of-interest description with clickable links
pub fn link_urls(text: &str) -> String {
    URL_PATTERN
        .replace_all(text, |caps: &Captures| {
            let url = &caps[0];
            let href = if url.starts_with("http://") || url.starts_with("https://") {
                url.to_string()
            } else {
                format!("http://{url}")
            };
            format!(r#"<a href="{href}" target="_blank" rel="noopener noreferrer">{url}</a>"#)
        })
        .into_owned()
}
