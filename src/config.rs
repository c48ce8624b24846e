//! Configuration loader and validator for the case-study catalog.
use crate::catalog::DEFAULT_RELATED_LIMIT;
use crate::presentation::PLACEHOLDER_IMAGE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub site: SiteConfig,
    pub catalog: CatalogConfig,
}

/// Brand and URL settings used for page metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    pub name: String,
    pub domain: String,
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    #[serde(default = "default_og_image")]
    pub default_og_image: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Where records come from and how they are served.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    pub source: SourceConfig,
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
}

/// Exactly one of `file` or `url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn default_placeholder_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

fn default_og_image() -> String {
    "/images/logo.svg".to_string()
}

fn default_related_limit() -> usize {
    DEFAULT_RELATED_LIMIT
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

impl SiteConfig {
    /// `https://{domain}{path}`; `path` should start with `/` or be empty.
    pub fn url(&self, path: &str) -> String {
        format!("https://{}{}", self.domain.trim_end_matches('/'), path)
    }
}

/// Load configuration from a YAML file and validate it.
/// - If `path` is None, uses `config.yaml` in the current working directory.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.yaml"));
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Validate a configuration instance.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.site.name.trim().is_empty() {
        return Err(ConfigError::Invalid("site.name must be non-empty"));
    }
    if cfg.site.domain.trim().is_empty() {
        return Err(ConfigError::Invalid("site.domain must be non-empty"));
    }
    if cfg.site.domain.contains("://") {
        return Err(ConfigError::Invalid("site.domain must be a bare host without a scheme"));
    }
    if cfg.site.placeholder_image.trim().is_empty() {
        return Err(ConfigError::Invalid("site.placeholder_image must be non-empty"));
    }

    let source = &cfg.catalog.source;
    let file = source.file.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let url = source.url.as_deref().map(str::trim).filter(|s| !s.is_empty());
    match (file, url) {
        (None, None) => {
            return Err(ConfigError::Invalid(
                "catalog.source must set either file or url",
            ))
        }
        (Some(_), Some(_)) => {
            return Err(ConfigError::Invalid(
                "catalog.source must set only one of file or url",
            ))
        }
        _ => {}
    }
    if cfg.catalog.related_limit == 0 {
        return Err(ConfigError::Invalid("catalog.related_limit must be > 0"));
    }
    if url.is_some() && cfg.catalog.http_timeout_ms == 0 {
        return Err(ConfigError::Invalid("catalog.http_timeout_ms must be > 0"));
    }

    Ok(())
}

/// Returns the example YAML content.
pub fn example() -> &'static str {
    r#"site:
  name: "BrandingTactics"
  domain: "brandingtactics.in"
  placeholder_image: "/api/placeholder/400/300"
  default_og_image: "/images/logo.svg"
  keywords:
    - "branding case studies"
    - "brand identity case studies"
    - "logo design portfolio"

catalog:
  source:
    file: "./data/case-studies.json"
  related_limit: 3
  http_timeout_ms: 10000
"#
}
