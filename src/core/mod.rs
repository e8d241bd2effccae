//! Core functionality for the frontline-navigator viewer.
//!
//! This module provides the snapshot store, feature transformers, timeline
//! navigation, layer synchronization and search, plus configuration, error
//! handling and terminal output.

pub mod colors;
pub mod config;
pub mod date_key;
pub mod dirs;
pub mod error;
pub mod fetcher;
pub mod geojson;
pub mod icons;
pub mod layers;
pub mod manifest;
pub mod output;
pub mod search;
pub mod session;
pub mod side;
pub mod snapshot;
pub mod store;
pub mod sync;
pub mod timeline;
pub mod transform;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{Result, ViewerError};

// === Data model ===
// Date keys, sides, the base manifest and per-date snapshots
pub use date_key::{date_input_value, DateKey};
pub use manifest::{BaseManifest, ResolvedUnit, UnitMeta};
pub use side::{BySide, Side};
pub use snapshot::{FrontLine, GeoLoc, Snapshot};

// === Transport ===
// Document fetchers for HTTP, local directories and in-memory fixtures
pub use fetcher::{DataSource, DirectoryFetcher, Fetcher, HttpFetcher, StaticFetcher};

// === Snapshot store ===
// FIFO-bounded cache in front of the fetcher
pub use store::{SnapshotCache, SnapshotStore};

// === Features and layers ===
// GeoJSON conversion, icon sizing and the map surface seam
pub use geojson::{Feature, FeatureCollection, Geometry};
pub use icons::{icon_size, IconSize};
pub use layers::{
    InMemoryMap, LayerId, LayerKind, LayerToggles, LineLayer, MapSurface, PointLayer, RenderLayer,
    UnitLayer,
};
pub use transform::{transform_frontline, transform_points, transform_static_lines, transform_units};

// === Navigation and synchronization ===
pub use search::SearchFilter;
pub use session::{Session, SessionOptions};
pub use sync::{ActiveSelection, LayerSynchronizer, SyncState, SyncTicket};
pub use timeline::{Direction, Timeline};

// === Configuration ===
pub use config::ViewerConfig;

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_error, print_info, print_section_header, print_success};
