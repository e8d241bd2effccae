//! Frontline Navigator - temporal snapshot viewer for front-line map data.
//!
//! The library loads a base manifest, resolves per-date snapshots through a
//! bounded cache, converts them into map layers and keeps those layers in
//! step with the selected date, the search query and the zoom level.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The [`Session`] context driving everything else
//! - Snapshot fetching and caching
//! - Timeline navigation
//! - Layer synchronization and unit search
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Data model
    BaseManifest,
    DataSource,
    DateKey,
    Direction,
    // Transport
    Fetcher,
    InMemoryMap,
    LayerKind,
    MapSurface,
    Result,
    SearchFilter,
    // Session
    Session,
    SessionOptions,
    Snapshot,
    SnapshotStore,
    SyncState,
    Timeline,
    ViewerConfig,
    // Error handling
    ViewerError,
};
