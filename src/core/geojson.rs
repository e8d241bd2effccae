//! GeoJSON-shaped values handed to the map surface.
//!
//! Only the geometry kinds the viewer produces are modelled. Properties are
//! generic so unit and point-of-interest features keep their own typed bags.

use crate::core::manifest::{Coordinate, CoordinateList};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Coordinate },
    LineString { coordinates: CoordinateList },
    MultiLineString { coordinates: Vec<CoordinateList> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature<P> {
    pub geometry: Geometry,
    pub properties: P,
}

impl<P> Feature<P> {
    pub fn point(coordinates: Coordinate, properties: P) -> Self {
        Self {
            geometry: Geometry::Point { coordinates },
            properties,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection<P> {
    pub features: Vec<Feature<P>>,
}

impl<P> FeatureCollection<P> {
    pub fn new(features: Vec<Feature<P>>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Lines carry no display metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoProperties {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_point_feature_shape() {
        let feature = Feature::point([30.5, 50.4], NoProperties {});
        assert_eq!(
            serde_json::to_value(&feature).unwrap(),
            json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [30.5, 50.4]},
                "properties": {}
            })
        );
    }

    #[test]
    fn test_collection_shape() {
        let collection = FeatureCollection::new(vec![Feature {
            geometry: Geometry::LineString {
                coordinates: vec![[1.0, 2.0], [3.0, 4.0]],
            },
            properties: NoProperties {},
        }]);
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["geometry"]["type"], "LineString");
        assert_eq!(collection.len(), 1);
    }
}
