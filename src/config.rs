//! Run configuration loaded from an optional YAML file.
//!
//! Every field has a default, so a missing file, an empty file, or a file that
//! sets only a few keys all produce a complete [`AppConfig`].
//!
//! ```yaml
//! topics_per_article: 5
//! fetch:
//!   timeout_secs: 10
//!   max_retries: 3
//!   base_delay_ms: 1000
//! feed:
//!   language: en-US
//!   region: US
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

use crate::error::Result;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum topics kept per article.
    pub topics_per_article: usize,
    pub fetch: FetchConfig,
    pub feed: FeedConfig,
}

/// HTTP behavior for live candidate retrieval.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    /// Retries after the first failed attempt.
    pub max_retries: usize,
    /// First backoff delay; doubles with each retry.
    pub base_delay_ms: u64,
    pub user_agent: String,
}

/// Google News feed locale.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub language: String,
    pub region: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            topics_per_article: 5,
            fetch: FetchConfig::default(),
            feed: FeedConfig::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_retries: 3,
            base_delay_ms: 1000,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            region: "US".to_string(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

impl AppConfig {
    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load the configuration from `path`, or the defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let yaml = tokio::fs::read_to_string(Path::new(path)).await?;
                let config = Self::from_yaml_str(&yaml)?;
                info!(config_path = path, "Loaded configuration");
                Ok(config)
            }
            None => {
                info!("No configuration file given; using defaults");
                Ok(Self::default())
            }
        }
    }
}
