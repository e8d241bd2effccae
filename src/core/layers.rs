//! Visual layers and the map surface they are attached to.
//!
//! The map widget itself is external. [`MapSurface`] is the seam: the viewer
//! hands it finished layers through [`RenderLayer`] and tracks attachment by
//! [`LayerId`]. Every rebuilt layer gets a fresh id, so a stale handle can
//! never detach a newer layer.
//!
//! # Public API
//! - [`LineLayer`]: front line, fortifications, dragon teeth
//! - [`UnitLayer`]: unit markers for one side, with icon size and visibility
//! - [`PointLayer`]: point-of-interest markers for one side
//! - [`InMemoryMap`]: recording surface used by the CLI and tests

use crate::core::{
    error::{Result, ViewerError},
    geojson::Geometry,
    icons::{icon_size, IconSize},
    side::Side,
    transform::{link_urls, LineFeature, PointCollection, UnitCollection, UnitProperties},
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out fresh layer ids
#[derive(Debug, Default)]
pub struct LayerIds {
    next: u64,
}

impl LayerIds {
    pub fn next_id(&mut self) -> LayerId {
        self.next += 1;
        LayerId(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    Frontline,
    Units,
    Geos,
    Fortifications,
    DragonTeeth,
}

impl LayerKind {
    /// Kinds a user can switch on and off
    pub const TOGGLEABLE: [LayerKind; 4] = [
        LayerKind::Units,
        LayerKind::Geos,
        LayerKind::Fortifications,
        LayerKind::DragonTeeth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Frontline => "frontline",
            LayerKind::Units => "units",
            LayerKind::Geos => "geos",
            LayerKind::Fortifications => "fortifications",
            LayerKind::DragonTeeth => "dragon-teeth",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerKind {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "units" => Ok(LayerKind::Units),
            "geos" | "points" => Ok(LayerKind::Geos),
            "fortifications" => Ok(LayerKind::Fortifications),
            "dragon-teeth" | "dragon_teeth" => Ok(LayerKind::DragonTeeth),
            other => Err(ViewerError::unknown_layer(other)),
        }
    }
}

/// Visibility switches. The front line has no switch and is always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerToggles {
    pub units: bool,
    pub geos: bool,
    pub fortifications: bool,
    pub dragon_teeth: bool,
}

impl Default for LayerToggles {
    fn default() -> Self {
        Self {
            units: true,
            geos: true,
            fortifications: false,
            dragon_teeth: false,
        }
    }
}

impl LayerToggles {
    pub fn is_enabled(&self, kind: LayerKind) -> bool {
        match kind {
            LayerKind::Frontline => true,
            LayerKind::Units => self.units,
            LayerKind::Geos => self.geos,
            LayerKind::Fortifications => self.fortifications,
            LayerKind::DragonTeeth => self.dragon_teeth,
        }
    }

    /// Flip a switch and return the new state
    pub fn toggle(&mut self, kind: LayerKind) -> bool {
        let flag = match kind {
            LayerKind::Frontline => return true,
            LayerKind::Units => &mut self.units,
            LayerKind::Geos => &mut self.geos,
            LayerKind::Fortifications => &mut self.fortifications,
            LayerKind::DragonTeeth => &mut self.dragon_teeth,
        };
        *flag = !*flag;
        *flag
    }
}

/// What the map surface needs from a layer
pub trait RenderLayer {
    fn id(&self) -> LayerId;
    fn kind(&self) -> LayerKind;
    fn feature_count(&self) -> usize;
    /// GeoJSON rendering with per-feature display hints
    fn to_geojson(&self) -> Value;
}

/// The external map widget
pub trait MapSurface {
    fn add_layer(&mut self, layer: &dyn RenderLayer);
    fn remove_layer(&mut self, id: LayerId);
    fn has_layer(&self, id: LayerId) -> bool;
}

#[derive(Debug, Clone)]
pub struct LineLayer {
    id: LayerId,
    kind: LayerKind,
    pub feature: LineFeature,
}

impl LineLayer {
    pub fn new(id: LayerId, kind: LayerKind, feature: LineFeature) -> Self {
        Self { id, kind, feature }
    }
}

impl RenderLayer for LineLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        self.kind
    }

    fn feature_count(&self) -> usize {
        1
    }

    fn to_geojson(&self) -> Value {
        serde_json::to_value(&self.feature).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone)]
pub struct UnitMarker {
    pub properties: UnitProperties,
    pub coordinates: [f64; 2],
    pub icon: IconSize,
    pub hidden: bool,
}

impl UnitMarker {
    pub fn rescale(&mut self, zoom: u8) {
        self.icon = icon_size(zoom, self.properties.side, &self.properties.sidc);
    }
}

#[derive(Debug, Clone)]
pub struct UnitLayer {
    id: LayerId,
    pub side: Side,
    pub markers: Vec<UnitMarker>,
}

impl UnitLayer {
    pub fn from_collection(id: LayerId, side: Side, collection: UnitCollection, zoom: u8) -> Self {
        let markers = collection
            .features
            .into_iter()
            .filter_map(|feature| {
                let Geometry::Point { coordinates } = feature.geometry else {
                    return None;
                };
                let icon = icon_size(zoom, side, &feature.properties.sidc);
                Some(UnitMarker {
                    properties: feature.properties,
                    coordinates,
                    icon,
                    hidden: false,
                })
            })
            .collect();
        Self { id, side, markers }
    }

    pub fn visible_count(&self) -> usize {
        self.markers.iter().filter(|m| !m.hidden).count()
    }
}

impl RenderLayer for UnitLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Units
    }

    fn feature_count(&self) -> usize {
        self.markers.len()
    }

    fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .markers
            .iter()
            .map(|marker| {
                json!({
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": marker.coordinates},
                    "properties": marker.properties,
                    "icon": {"width": marker.icon.width, "height": marker.icon.height},
                    "hidden": marker.hidden,
                })
            })
            .collect();
        json!({"type": "FeatureCollection", "features": features})
    }
}

#[derive(Debug, Clone)]
pub struct PointLayer {
    id: LayerId,
    pub side: Side,
    pub collection: PointCollection,
}

impl PointLayer {
    pub fn new(id: LayerId, side: Side, collection: PointCollection) -> Self {
        Self { id, side, collection }
    }

    /// Popup markup for each point, in feature order
    pub fn popups(&self) -> Vec<String> {
        self.collection
            .features
            .iter()
            .map(|feature| link_urls(&feature.properties.description))
            .collect()
    }
}

impl RenderLayer for PointLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Geos
    }

    fn feature_count(&self) -> usize {
        self.collection.len()
    }

    fn to_geojson(&self) -> Value {
        let mut value = serde_json::to_value(&self.collection).unwrap_or(Value::Null);
        if let Some(features) = value.get_mut("features").and_then(Value::as_array_mut) {
            for (feature, popup) in features.iter_mut().zip(self.popups()) {
                feature["popup"] = Value::String(popup);
            }
        }
        value
    }
}

/// Attachment record kept by [`InMemoryMap`]
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedLayer {
    pub kind: LayerKind,
    pub feature_count: usize,
}

/// Map surface that only records what is attached
#[derive(Debug, Default)]
pub struct InMemoryMap {
    layers: BTreeMap<LayerId, AttachedLayer>,
    added: usize,
    removed: usize,
}

impl InMemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached(&self) -> impl Iterator<Item = (&LayerId, &AttachedLayer)> {
        self.layers.iter()
    }

    pub fn count_of(&self, kind: LayerKind) -> usize {
        self.layers.values().filter(|layer| layer.kind == kind).count()
    }

    /// Total `(add, remove)` calls received
    pub fn operations(&self) -> (usize, usize) {
        (self.added, self.removed)
    }
}

impl MapSurface for InMemoryMap {
    fn add_layer(&mut self, layer: &dyn RenderLayer) {
        self.added += 1;
        self.layers.insert(
            layer.id(),
            AttachedLayer {
                kind: layer.kind(),
                feature_count: layer.feature_count(),
            },
        );
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.removed += 1;
        self.layers.remove(&id);
    }

    fn has_layer(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geojson::{Feature, FeatureCollection};
    use crate::core::side::BySide;

    fn unit_collection(names: &[&str]) -> UnitCollection {
        FeatureCollection::new(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    Feature::point(
                        [i as f64, 0.0],
                        UnitProperties {
                            unit_id: i as u64,
                            name: name.to_string(),
                            side: Side::Ru,
                            sidc: "10061000101211000000".to_string(),
                            custom_text: String::new(),
                        },
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_layer_ids_are_unique() {
        let mut ids = LayerIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_toggles_defaults_and_flip() {
        let mut toggles = LayerToggles::default();
        assert!(toggles.is_enabled(LayerKind::Frontline));
        assert!(toggles.is_enabled(LayerKind::Units));
        assert!(!toggles.is_enabled(LayerKind::Fortifications));

        assert!(!toggles.toggle(LayerKind::Units));
        assert!(toggles.toggle(LayerKind::Units));
        assert!(toggles.toggle(LayerKind::Frontline));
    }

    #[test]
    fn test_layer_kind_parse() {
        assert_eq!("dragon-teeth".parse::<LayerKind>().unwrap(), LayerKind::DragonTeeth);
        assert_eq!("points".parse::<LayerKind>().unwrap(), LayerKind::Geos);
        assert!("frontline".parse::<LayerKind>().is_err());
    }

    #[test]
    fn test_unit_layer_sizes_markers_for_zoom() {
        let mut layer = UnitLayer::from_collection(LayerId(1), Side::Ru, unit_collection(&["a", "b"]), 10);
        assert_eq!(layer.markers.len(), 2);
        assert!((layer.markers[0].icon.width - 31.2).abs() < 1e-9);

        layer.markers[0].rescale(5);
        assert!((layer.markers[0].icon.width - 5.0 * 2.5 * 1.3 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_unit_layer_geojson_carries_display_hints() {
        let mut layer = UnitLayer::from_collection(LayerId(1), Side::Ru, unit_collection(&["a"]), 8);
        layer.markers[0].hidden = true;
        let value = layer.to_geojson();
        assert_eq!(value["features"][0]["properties"]["unitName"], "a");
        assert_eq!(value["features"][0]["hidden"], true);
        assert_eq!(layer.visible_count(), 0);
    }

    #[test]
    fn test_point_layer_popups_link_urls() {
        let collections = crate::core::transform::transform_points(
            &[(
                "ua".to_string(),
                vec![crate::core::snapshot::GeoLoc {
                    coordinate: [1.0, 2.0],
                    description: "source: https://example.org".to_string(),
                }],
            )]
            .into_iter()
            .collect(),
        );
        let BySide { ua, .. } = collections;
        let layer = PointLayer::new(LayerId(3), Side::Ua, ua);
        assert!(layer.popups()[0].contains(r#"<a href="https://example.org""#));
        assert!(layer.to_geojson()["features"][0]["popup"]
            .as_str()
            .unwrap()
            .contains("noopener"));
    }

    #[test]
    fn test_in_memory_map_tracks_layers() {
        let mut map = InMemoryMap::new();
        let layer = UnitLayer::from_collection(LayerId(7), Side::Ru, unit_collection(&["a"]), 8);
        map.add_layer(&layer);
        assert!(map.has_layer(LayerId(7)));
        assert_eq!(map.count_of(LayerKind::Units), 1);

        map.remove_layer(LayerId(7));
        assert!(!map.has_layer(LayerId(7)));
        assert_eq!(map.operations(), (1, 1));
    }
}
