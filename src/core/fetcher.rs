//! Transport boundary: fetch a named JSON document.
//!
//! The viewer reads two document families from one location: the singleton
//! `base` manifest and one document per [`DateKey`](crate::core::DateKey).
//! Each source lays them out as `<location>/<name>.json`.
//!
//! # Implementations
//! - [`HttpFetcher`]: remote base URL, via `reqwest`
//! - [`DirectoryFetcher`]: local directory, via `tokio::fs`
//! - [`StaticFetcher`]: in-memory documents that record every request

use crate::core::{
    date_key::DateKey,
    error::{Result, ViewerError},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Name of the manifest document
pub const MANIFEST_DOCUMENT: &str = "base";

/// Default remote location of the data documents
pub const DEFAULT_DATA_URL: &str = "https://raw.githubusercontent.com/owlmaps/map-data/master/data";

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch and parse `<name>.json`. No retries.
    async fn fetch_document(&self, name: &str) -> Result<Value>;

    /// Human-readable location for log lines
    fn describe(&self) -> String;

    async fn fetch_manifest(&self) -> Result<Value> {
        self.fetch_document(MANIFEST_DOCUMENT).await
    }

    async fn fetch_snapshot(&self, key: &DateKey) -> Result<Value> {
        self.fetch_document(key.as_str()).await
    }
}

/// Where the documents live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Remote(String),
    Directory(PathBuf),
}

impl DataSource {
    /// `http(s)://` strings are remote, everything else is a directory path
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Remote(raw.trim_end_matches('/').to_string())
        } else {
            DataSource::Directory(PathBuf::from(raw))
        }
    }

    pub fn into_fetcher(self) -> Box<dyn Fetcher> {
        match self {
            DataSource::Remote(base_url) => Box::new(HttpFetcher::new(base_url)),
            DataSource::Directory(dir) => Box::new(DirectoryFetcher::new(dir)),
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Remote(DEFAULT_DATA_URL.to_string())
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Remote(url) => f.write_str(url),
            DataSource::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn document_url(&self, name: &str) -> String {
        format!("{}/{name}.json", self.base_url)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_document(&self, name: &str) -> Result<Value> {
        let url = self.document_url(name);
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ViewerError::document_not_found(url));
        }
        let value = response.error_for_status()?.json::<Value>().await?;
        Ok(value)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

pub struct DirectoryFetcher {
    dir: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl Fetcher for DirectoryFetcher {
    async fn fetch_document(&self, name: &str) -> Result<Value> {
        let path = self.dir.join(format!("{name}.json"));
        log::debug!("Reading {}", path.display());
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ViewerError::document_not_found(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// In-memory documents; every request is recorded, hits and misses alike
#[derive(Default)]
pub struct StaticFetcher {
    documents: Mutex<HashMap<String, Value>>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, name: impl Into<String>, document: Value) -> Self {
        self.insert(name, document);
        self
    }

    pub fn insert(&self, name: impl Into<String>, document: Value) {
        if let Ok(mut documents) = self.documents.lock() {
            documents.insert(name.into(), document);
        }
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        self.documents.lock().ok()?.remove(name)
    }

    /// Names requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch_document(&self, name: &str) -> Result<Value> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(name.to_string());
        }
        self.documents
            .lock()
            .ok()
            .and_then(|documents| documents.get(name).cloned())
            .ok_or_else(|| ViewerError::document_not_found(format!("{name}.json")))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    async fn fetch_document(&self, name: &str) -> Result<Value> {
        (**self).fetch_document(name).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    async fn fetch_document(&self, name: &str) -> Result<Value> {
        (**self).fetch_document(name).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_data_source_parse() {
        assert_eq!(
            DataSource::parse("https://example.org/data/"),
            DataSource::Remote("https://example.org/data".to_string())
        );
        assert_eq!(
            DataSource::parse("./data"),
            DataSource::Directory(PathBuf::from("./data"))
        );
    }

    #[test]
    fn test_http_document_url() {
        let fetcher = HttpFetcher::new("https://example.org/data");
        assert_eq!(
            fetcher.document_url("20230101"),
            "https://example.org/data/20230101.json"
        );
    }

    #[tokio::test]
    async fn test_directory_fetcher_reads_documents() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("base.json"), r#"{"dates": ["20230101"]}"#).unwrap();

        let fetcher = DirectoryFetcher::new(dir.path());
        let value = fetcher.fetch_document(MANIFEST_DOCUMENT).await.unwrap();
        assert_eq!(value["dates"][0], "20230101");
    }

    #[tokio::test]
    async fn test_directory_fetcher_missing_document() {
        let dir = TempDir::new().unwrap();
        let fetcher = DirectoryFetcher::new(dir.path());
        let err = fetcher.fetch_document("20230101").await.unwrap_err();
        assert!(matches!(err, ViewerError::DocumentNotFound { .. }));
    }

    #[tokio::test]
    async fn test_directory_fetcher_parse_failure() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("20230101.json"), "{ truncated").unwrap();
        let fetcher = DirectoryFetcher::new(dir.path());
        let err = fetcher.fetch_document("20230101").await.unwrap_err();
        assert!(matches!(err, ViewerError::Json(_)));
    }

    #[tokio::test]
    async fn test_static_fetcher_records_requests() {
        let fetcher = StaticFetcher::new().with_document("20230101", json!({}));
        assert!(fetcher.fetch_document("20230101").await.is_ok());
        assert!(fetcher.fetch_document("20230102").await.is_err());
        assert_eq!(fetcher.requests(), vec!["20230101", "20230102"]);
    }

    #[tokio::test]
    async fn test_manifest_and_snapshot_names() {
        let fetcher = StaticFetcher::new()
            .with_document("base", json!({"dates": ["20230101"]}))
            .with_document("20230101", json!({"frontline": []}));
        let key = DateKey::parse("20230101").unwrap();

        assert!(fetcher.fetch_manifest().await.is_ok());
        assert!(fetcher.fetch_snapshot(&key).await.is_ok());
        assert_eq!(fetcher.requests(), vec!["base", "20230101"]);
    }
}
