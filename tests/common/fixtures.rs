//! Predefined data scenarios
//!
//! Unit 1 is named in the manifest, unit 2 is named but absent from the
//! snapshots, unit 99 appears in snapshots without a manifest entry.

#![allow(dead_code)]

use super::data_dir::TestDataDir;
use serde_json::{json, Value};

pub const THREE_DATES: [&str; 3] = ["20230101", "20230102", "20230103"];

pub fn base_manifest(dates: &[&str]) -> Value {
    json!({
        "unit_map": {
            "1": {"n": "14th Mechanized Brigade", "sidc": "10031000161211000000"},
            "2": {"n": "114th Guards Regiment", "sidc": "10061000151211000000"},
            "3": {"n": "Coastal Defence", "s": "ua", "sidc": "10031000141211000000", "sidc_custom_text": "CD"}
        },
        "dates": dates,
        "fortifications": [[[30.0, 47.0], [30.5, 47.5]], [[31.0, 48.0], [31.2, 48.1]]],
        "dragon_teeth": [[[32.0, 47.0], [32.1, 47.1]]]
    })
}

/// Snapshot whose contents differ by `day` so dates can be told apart
pub fn snapshot(day: usize) -> Value {
    let ua: Vec<Value> = (0..day).map(|i| json!([1, [30.0 + i as f64, 47.0]])).collect();
    json!({
        "frontline": [[30.0, 47.0], [30.5, 47.5], [31.0, 48.0 + day as f64]],
        "units": {
            "ua": ua,
            "ru": [[99, [33.0, 48.0]], [2, [33.5, 48.5]]]
        },
        "geos": {
            "ua": [{"c": [30.1, 47.1], "d": "Depot, see https://example.org/depot"}],
            "ru": [{"c": [33.1, 48.1], "d": "Bridge"}]
        }
    })
}

/// Manifest plus one snapshot per date, the n-th date carrying n ua units
pub fn create_data_dir(dates: &[&str]) -> anyhow::Result<TestDataDir> {
    let data = TestDataDir::new()?;
    data.write_document("base", &base_manifest(dates))?;
    for (index, date) in dates.iter().enumerate() {
        data.write_document(date, &snapshot(index + 1))?;
    }
    Ok(data)
}

pub fn create_three_day_data() -> anyhow::Result<TestDataDir> {
    create_data_dir(&THREE_DATES)
}

/// Twenty consecutive January dates
pub fn create_twenty_day_data() -> anyhow::Result<TestDataDir> {
    let dates: Vec<String> = (1..=20).map(|day| format!("202301{day:02}")).collect();
    let refs: Vec<&str> = dates.iter().map(String::as_str).collect();
    create_data_dir(&refs)
}
