//! Unit icon sizing.
//!
//! The size depends on the zoom level, the unit's side (rectangular `ua`
//! frames versus square `ru` frames) and whether the symbology code carries
//! an amplifier. The rendered symbol itself is produced outside this crate.

use crate::core::side::Side;
use serde::{Deserialize, Serialize};

/// Position of the amplifier digit within a symbology code
const AMPLIFIER_DIGIT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IconSize {
    pub width: f64,
    pub height: f64,
}

impl IconSize {
    /// Popup anchor offset above the icon
    pub fn popup_offset(&self) -> f64 {
        -(self.height / 1.5)
    }
}

fn zoom_factor(zoom: u8) -> f64 {
    match zoom {
        0..=7 => 2.5,
        8..=10 => 3.0,
        _ => 3.5,
    }
}

pub fn has_amplifier(sidc: &str) -> bool {
    sidc.as_bytes()
        .get(AMPLIFIER_DIGIT)
        .is_some_and(|&digit| digit != b'0')
}

pub fn icon_size(zoom: u8, side: Side, sidc: &str) -> IconSize {
    let identity = match side {
        Side::Ua => 1.0,
        Side::Ru => 1.3,
    };
    let amplifier = match (has_amplifier(sidc), side) {
        (true, _) | (false, Side::Ua) => 1.0,
        (false, Side::Ru) => 0.8,
    };
    let edge = f64::from(zoom) * zoom_factor(zoom) * identity * amplifier;
    IconSize {
        width: edge,
        height: edge,
    }
}
