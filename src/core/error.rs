//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ViewerError`] which covers every failure mode of the
//! viewer core. It uses `thiserror` for ergonomic error definitions and
//! includes constructors for the common failure scenarios.
//!
//! # Public API
//! - [`ViewerError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ViewerError>`
//!
//! # Error Categories
//! - **Fatal**: the base manifest could not be loaded, nothing can render
//! - **Recoverable**: a per-date snapshot fetch failed, previous layers stay
//! - **Input**: malformed date keys, unknown directions or layer names
//! - **Synchronization**: a second sync while one is in flight, stale tickets
//! - **Transport / config**: HTTP, I/O and JSON failures

use crate::core::date_key::DateKey;
use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for frontline-navigator
#[derive(Error, Debug)]
pub enum ViewerError {
    // Terminal
    #[error("Failed to load base manifest: {source}")]
    ManifestLoad {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Base manifest contains no dates")]
    EmptyManifest,

    // Recoverable
    #[error("Failed to fetch snapshot for {key}: {source}")]
    Fetch {
        key: DateKey,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Document not found: {location}")]
    DocumentNotFound { location: String },

    // Input errors
    #[error("Invalid date key: '{input}'. Use format like: 2023-01-31 or 20230131")]
    InvalidDateKey { input: String },

    #[error("No data available for {key} (available: {first} to {last})")]
    DateNotAvailable {
        key: DateKey,
        first: DateKey,
        last: DateKey,
    },

    #[error(
        "Unknown direction: '{input}'. Use one of: first, last, next, previous, next-7, previous-7"
    )]
    UnknownDirection { input: String },

    #[error("Unknown layer: '{input}'. Use one of: units, geos, fortifications, dragon-teeth")]
    UnknownLayer { input: String },

    #[error("Invalid zoom level: '{input}'. Use a whole number between 0 and 255")]
    InvalidZoom { input: String },

    // Synchronization
    #[error("A synchronization for {pending} is already in flight")]
    SyncInFlight { pending: DateKey },

    #[error("Synchronization ticket {generation} is stale (current: {current})")]
    StaleSync { generation: u64, current: u64 },

    // Transport
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Config
    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

/// Convenience type alias for Results using ViewerError
pub type Result<T> = std::result::Result<T, ViewerError>;

impl ViewerError {
    /// Wrap any error as a fatal manifest load failure
    pub fn manifest_load<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::ManifestLoad {
            source: source.into(),
        }
    }

    /// Wrap any error as a snapshot fetch failure for `key`
    pub fn fetch<E>(key: DateKey, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Fetch {
            key,
            source: source.into(),
        }
    }

    pub fn document_not_found(location: impl Into<String>) -> Self {
        Self::DocumentNotFound {
            location: location.into(),
        }
    }

    pub fn invalid_date_key(input: impl Into<String>) -> Self {
        Self::InvalidDateKey {
            input: input.into(),
        }
    }

    pub fn unknown_direction(input: impl Into<String>) -> Self {
        Self::UnknownDirection {
            input: input.into(),
        }
    }

    pub fn unknown_layer(input: impl Into<String>) -> Self {
        Self::UnknownLayer {
            input: input.into(),
        }
    }

    pub fn invalid_zoom(input: impl Into<String>) -> Self {
        Self::InvalidZoom {
            input: input.into(),
        }
    }

    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Whether the session can continue after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ManifestLoad { .. } | Self::EmptyManifest)
    }
}
