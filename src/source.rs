//! External record sources the catalog can be (re)loaded from.

use crate::config::CatalogConfig;
use crate::model::{CaseStudy, RecordDocument};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("record endpoint returned {0}")]
    Status(StatusCode),
    #[error("unsupported record file format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("invalid record source URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("record source unavailable: {0}")]
    Unavailable(String),
}

/// Format of an authored record document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Yaml,
}

impl RecordFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(RecordFormat::Json),
            "yaml" | "yml" => Some(RecordFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse a record document (bare array or `{ caseStudies: [...] }`).
pub fn parse_records(raw: &str, format: RecordFormat) -> Result<Vec<CaseStudy>, SourceError> {
    let doc: RecordDocument = match format {
        RecordFormat::Json => serde_json::from_str(raw)?,
        RecordFormat::Yaml => serde_yaml::from_str(raw)?,
    };
    Ok(doc.into_records())
}

/// Something that can produce the full record set in display order.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short human-readable origin used in logs.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<CaseStudy>, SourceError>;
}

/// Records bundled in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<CaseStudy>,
}

impl StaticSource {
    pub fn new(records: Vec<CaseStudy>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    fn describe(&self) -> String {
        format!("static bundle ({} records)", self.records.len())
    }

    async fn fetch(&self) -> Result<Vec<CaseStudy>, SourceError> {
        Ok(self.records.clone())
    }
}

/// A JSON or YAML file on disk, re-read on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: RecordFormat,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        let format =
            RecordFormat::from_path(&path).ok_or_else(|| SourceError::UnsupportedFormat(path.clone()))?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<CaseStudy>, SourceError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        parse_records(&raw, self.format)
    }
}

/// A JSON document served over HTTP.
#[derive(Clone)]
pub struct HttpSource {
    http: Client,
    url: Url,
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl HttpSource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, SourceError> {
        let http = Client::builder()
            .user_agent(concat!("case-catalog/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        format!("url {}", self.url)
    }

    async fn fetch(&self) -> Result<Vec<CaseStudy>, SourceError> {
        debug!(url = %self.url, "fetching case study records");
        let res = self.http.get(self.url.clone()).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }
        let body = res.text().await?;
        parse_records(&body, RecordFormat::Json)
    }
}

/// Build the source named by the `catalog.source` config section.
pub fn from_config(cfg: &CatalogConfig) -> Result<Box<dyn CatalogSource>, SourceError> {
    if let Some(url) = cfg.source.url.as_deref() {
        let url = Url::parse(url).map_err(|err| SourceError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        let timeout = Duration::from_millis(cfg.http_timeout_ms);
        return Ok(Box::new(HttpSource::new(url, timeout)?));
    }
    match cfg.source.file.as_deref() {
        Some(path) => Ok(Box::new(FileSource::new(path)?)),
        None => Err(SourceError::Unavailable(
            "catalog.source names neither a file nor a url".into(),
        )),
    }
}
