//! Common assertion helpers for command output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// The snapshot summary header for `date` (as `YYYY-MM-DD`)
pub fn shows_date(date: &str) -> impl Predicate<str> {
    predicates::str::contains("Snapshot:").and(predicates::str::contains(date.to_string()))
}

pub fn error_message(text: &str) -> impl Predicate<str> {
    predicates::str::contains("✕ Error:").and(predicates::str::contains(text.to_string()))
}

pub fn manifest_error() -> impl Predicate<str> {
    error_message("Failed to load base manifest")
}

pub fn unavailable_date() -> impl Predicate<str> {
    error_message("No data available")
}
