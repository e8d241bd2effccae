//! Temporary data directories and isolated command setup

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A data directory plus a private config home. Both `TempDir`s must stay
/// alive for the duration of the test.
pub struct TestDataDir {
    pub temp_dir: TempDir,
    pub path: PathBuf,
    pub config_home: TempDir,
}

impl TestDataDir {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();
        Ok(Self {
            temp_dir,
            path,
            config_home: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `<name>.json`
    pub fn write_document(&self, name: &str, document: &Value) -> anyhow::Result<()> {
        let content = serde_json::to_string(document)?;
        std::fs::write(self.path.join(format!("{name}.json")), content)?;
        Ok(())
    }

    pub fn remove_document(&self, name: &str) -> anyhow::Result<()> {
        std::fs::remove_file(self.path.join(format!("{name}.json")))?;
        Ok(())
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_home
            .path()
            .join("frontline-navigator")
            .join("config.json")
    }

    /// The binary with its config home isolated and colors off
    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("frontline-navigator")?;
        cmd.env("XDG_CONFIG_HOME", self.config_home.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        Ok(cmd)
    }

    /// [`command`](Self::command) reading data from this directory
    pub fn command_with_data(&self) -> anyhow::Result<Command> {
        let mut cmd = self.command()?;
        cmd.arg("--data").arg(&self.path);
        Ok(cmd)
    }
}
