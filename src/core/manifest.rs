//! The base manifest loaded once at startup.
//!
//! The manifest holds the ordered list of available dates, the unit metadata
//! table and the static geometry (fortifications, dragon teeth). It is
//! validated on load and shared read-only for the rest of the session.

use crate::core::{
    date_key::DateKey,
    error::{Result, ViewerError},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Numeric unit identifier used by snapshots
pub type UnitId = u64;

/// Position pair as stored in the data documents
pub type Coordinate = [f64; 2];

/// A polyline
pub type CoordinateList = Vec<Coordinate>;

/// Symbology code used when a unit has no metadata
pub const FALLBACK_SIDC: &str = "30000000000000000000";

/// Name used when a unit has no metadata
pub const UNKNOWN_UNIT_NAME: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitMeta {
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub side_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidc_custom_text: Option<String>,
}

/// Unit metadata with fallbacks applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUnit {
    pub name: String,
    pub sidc: String,
    pub custom_text: String,
}

impl ResolvedUnit {
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_UNIT_NAME.to_string(),
            sidc: FALLBACK_SIDC.to_string(),
            custom_text: String::new(),
        }
    }
}

impl UnitMeta {
    /// Fill absent fields with the lookup-miss fallbacks
    pub fn resolve(&self) -> ResolvedUnit {
        ResolvedUnit {
            name: self
                .name
                .clone()
                .unwrap_or_else(|| UNKNOWN_UNIT_NAME.to_string()),
            sidc: self.sidc.clone().unwrap_or_else(|| FALLBACK_SIDC.to_string()),
            custom_text: self.sidc_custom_text.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseManifest {
    #[serde(default)]
    pub unit_map: HashMap<UnitId, UnitMeta>,
    pub dates: Vec<DateKey>,
    #[serde(default)]
    pub fortifications: Vec<CoordinateList>,
    #[serde(default)]
    pub dragon_teeth: Vec<CoordinateList>,
    #[serde(default)]
    pub styles: HashMap<String, String>,
}

impl BaseManifest {
    /// Parse and validate a manifest document
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let manifest: BaseManifest =
            serde_json::from_value(value).map_err(ViewerError::manifest_load)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        if self.dates.is_empty() {
            return Err(ViewerError::EmptyManifest);
        }
        Ok(())
    }

    /// Resolve a unit id, degrading to the unknown identity on a miss
    pub fn resolve_unit(&self, id: UnitId) -> ResolvedUnit {
        match self.unit_map.get(&id) {
            Some(meta) => meta.resolve(),
            None => {
                log::trace!("Unit {id} missing from unit table, using fallback");
                ResolvedUnit::unknown()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_manifest_document() {
        let manifest = BaseManifest::from_value(json!({
            "unit_map": {
                "14": {"n": "14th Mechanized", "s": "ua", "sidc": "10031000161211000000"},
                "7": {"n": "7th Guards", "sidc": "10061000151211000000", "sidc_custom_text": "HQ"}
            },
            "dates": ["20230101", "20230102"],
            "fortifications": [[[47.1, 37.5], [47.2, 37.6]]],
            "dragon_teeth": [],
            "styles": {"frontline": "#ff0000"}
        }))
        .unwrap();

        assert_eq!(manifest.dates.len(), 2);
        assert_eq!(manifest.fortifications.len(), 1);
        assert_eq!(manifest.resolve_unit(14).name, "14th Mechanized");
        assert_eq!(manifest.resolve_unit(7).custom_text, "HQ");
        assert_eq!(manifest.styles.get("frontline").unwrap(), "#ff0000");
    }

    #[test]
    fn test_missing_unit_resolves_to_fallback() {
        let manifest = BaseManifest::from_value(json!({"dates": ["20230101"]})).unwrap();
        let unit = manifest.resolve_unit(999);
        assert_eq!(unit, ResolvedUnit::unknown());
        assert_eq!(unit.sidc, FALLBACK_SIDC);
    }

    #[test]
    fn test_partial_unit_meta_resolves_each_field() {
        let meta = UnitMeta {
            name: None,
            sidc: Some("10031000161211000000".to_string()),
            ..Default::default()
        };
        let unit = meta.resolve();
        assert_eq!(unit.name, UNKNOWN_UNIT_NAME);
        assert_eq!(unit.sidc, "10031000161211000000");
        assert_eq!(unit.custom_text, "");
    }

    #[test]
    fn test_empty_dates_rejected() {
        let err = BaseManifest::from_value(json!({"dates": []})).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_malformed_manifest_rejected() {
        let err = BaseManifest::from_value(json!({"dates": ["not-a-date"]})).unwrap_err();
        assert!(matches!(err, ViewerError::ManifestLoad { .. }));
    }
}
