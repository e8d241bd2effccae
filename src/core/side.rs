//! The two factions tracked by the dataset.
//!
//! Documents tag data with `"ua"` and `"ru"`. [`Side`] replaces those string
//! tags with a closed enumeration so every per-side branch is checked for
//! exhaustiveness. [`BySide`] holds one value per side.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Ua,
    Ru,
}

impl Side {
    /// Both sides in rendering order
    pub const ALL: [Side; 2] = [Side::Ua, Side::Ru];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Ua => "ua",
            Side::Ru => "ru",
        }
    }

    /// Map a document tag to a side; unknown tags yield `None`
    pub fn from_tag(tag: &str) -> Option<Side> {
        match tag {
            "ua" => Some(Side::Ua),
            "ru" => Some(Side::Ru),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value for each side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BySide<T> {
    #[serde(default)]
    pub ua: T,
    #[serde(default)]
    pub ru: T,
}

impl<T> BySide<T> {
    pub fn new(ua: T, ru: T) -> Self {
        Self { ua, ru }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Ua => &self.ua,
            Side::Ru => &self.ru,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Ua => &mut self.ua,
            Side::Ru => &mut self.ru,
        }
    }

    /// Build both values from a per-side function
    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        Self {
            ua: f(Side::Ua),
            ru: f(Side::Ru),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Side, T) -> U) -> BySide<U> {
        BySide {
            ua: f(Side::Ua, self.ua),
            ru: f(Side::Ru, self.ru),
        }
    }

    /// Iterate `(side, value)` in rendering order
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().map(move |side| (side, self.get(side)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Side::from_tag("ua"), Some(Side::Ua));
        assert_eq!(Side::from_tag("ru"), Some(Side::Ru));
        assert_eq!(Side::from_tag("by"), None);
        assert_eq!(Side::from_tag("UA"), None);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Ru).unwrap(), r#""ru""#);
        let side: Side = serde_json::from_str(r#""ua""#).unwrap();
        assert_eq!(side, Side::Ua);
    }

    #[test]
    fn test_by_side_access() {
        let mut counts = BySide::new(3, 5);
        *counts.get_mut(Side::Ru) += 1;
        assert_eq!(*counts.get(Side::Ua), 3);
        assert_eq!(*counts.get(Side::Ru), 6);

        let tags: Vec<_> = counts.iter().map(|(side, _)| side.as_str()).collect();
        assert_eq!(tags, vec!["ua", "ru"]);
    }

    #[test]
    fn test_by_side_missing_field_defaults() {
        let counts: BySide<u32> = serde_json::from_str(r#"{"ua": 4}"#).unwrap();
        assert_eq!(counts, BySide::new(4, 0));
    }
}
