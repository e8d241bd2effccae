//! Persistent viewer settings.
//!
//! Stored as pretty JSON in `<config dir>/frontline-navigator/config.json`.
//! A missing file means defaults; command-line flags override whatever is
//! loaded before the session opens.

use crate::core::{
    dirs::get_config_directory,
    error::{Result, ViewerError},
    fetcher::DataSource,
    session::SessionOptions,
    store::DEFAULT_CACHE_CAPACITY,
    sync::DEFAULT_ZOOM,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Base URL or local directory holding `base.json` and the dated documents
    pub data_source: String,
    pub cache_capacity: usize,
    pub zoom: u8,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_source: DataSource::default().to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            zoom: DEFAULT_ZOOM,
            updated_at: None,
        }
    }
}

impl ViewerConfig {
    pub fn config_file() -> Result<PathBuf> {
        Ok(get_config_directory()?.join(CONFIG_FILE))
    }

    /// Load the user's config, falling back to defaults when none exists
    pub fn load_or_default() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ViewerError::config_read_failed(path, e))?;
        serde_json::from_str(&content).map_err(|e| ViewerError::config_parse_failed(path, e))
    }

    pub fn save(&mut self) -> Result<PathBuf> {
        let path = Self::config_file()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        self.updated_at = Some(chrono::Utc::now());
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded values
    pub fn with_overrides(
        mut self,
        data_source: Option<String>,
        cache_capacity: Option<usize>,
        zoom: Option<u8>,
    ) -> Self {
        if let Some(data_source) = data_source {
            self.data_source = data_source;
        }
        if let Some(cache_capacity) = cache_capacity {
            self.cache_capacity = cache_capacity;
        }
        if let Some(zoom) = zoom {
            self.zoom = zoom;
        }
        self
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.data_source)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            cache_capacity: self.cache_capacity,
            zoom: self.zoom,
            ..SessionOptions::default()
        }
    }
}
