//! Settings file for the terminal client.
//!
//! Settings live in a RON file, `./hn_search.ron` unless `--config` names
//! another one. Every field is optional; missing fields keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::engine_info;
use hn_search_core::DEFAULT_QUERY;
use hn_search_engine::{FetchSettings, DEFAULT_BASE_URL, DEFAULT_HITS_PER_PAGE};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "hn_search.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub base_url: String,
    pub hits_per_page: u32,
    pub default_query: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    /// Where to write the log; `None` disables file logging.
    pub log_file: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            hits_per_page: DEFAULT_HITS_PER_PAGE,
            default_query: DEFAULT_QUERY.to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            log_file: Some(PathBuf::from(engine_logging::DEFAULT_LOG_FILE)),
        }
    }
}

impl SearchConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            hits_per_page: self.hits_per_page,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hits_per_page == 0 {
            return Err(ConfigError::Invalid(
                "hits_per_page must be at least 1".to_string(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "connect_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads the config from `explicit`, or from the default file when present.
///
/// A missing default file yields the defaults; a missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<SearchConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok(SearchConfig::default());
            }
            path
        }
    };

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    config.validate()?;
    engine_info!("Loaded config from {:?}", path);
    Ok(config)
}

fn parse_config(content: &str) -> Result<SearchConfig, ron::error::SpannedError> {
    ron::from_str(content)
}
