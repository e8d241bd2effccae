//! Shared test utilities for frontline-navigator integration tests
//!
//! Fixture data is written into temporary directories and served through the
//! directory data source, so no test touches the network.

pub mod assertions;
pub mod data_dir;
pub mod fixtures;
