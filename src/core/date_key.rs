//! Date identifiers ordering the timeline.
//!
//! A [`DateKey`] is an eight-digit `YYYYMMDD` string. Lexical order equals
//! chronological order, so keys compare as plain strings. Keys are validated
//! on construction, both when typed by the user and when read from the base
//! manifest.

use crate::core::error::{Result, ViewerError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shown in the date input when no date is selected yet
pub const FALLBACK_DATE_STRING: &str = "2023-01-01";

const SEPARATORS: [char; 3] = ['-', '/', '.'];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(String);

impl DateKey {
    /// Parse a raw `YYYYMMDD` key
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ViewerError::invalid_date_key(raw));
        }
        NaiveDate::parse_from_str(raw, "%Y%m%d").map_err(|_| ViewerError::invalid_date_key(raw))?;
        Ok(Self(raw.to_string()))
    }

    /// Convert free-text date input (`2023-01-31`, `2023/01/31`, ...) by
    /// dropping separator characters
    pub fn from_input(input: &str) -> Result<Self> {
        let stripped: String = input
            .trim()
            .chars()
            .filter(|c| !SEPARATORS.contains(c) && !c.is_whitespace())
            .collect();
        Self::parse(&stripped).map_err(|_| ViewerError::invalid_date_key(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `YYYY-MM-DD` rendering for date inputs
    pub fn to_date_string(&self) -> String {
        format!("{}-{}-{}", &self.0[0..4], &self.0[4..6], &self.0[6..8])
    }
}

/// Date input value for an optional key
pub fn date_input_value(key: Option<&DateKey>) -> String {
    key.map(DateKey::to_date_string)
        .unwrap_or_else(|| FALLBACK_DATE_STRING.to_string())
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DateKey {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_input(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = ViewerError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.0
    }
}
