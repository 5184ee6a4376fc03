//! Application configuration domain model

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::list::DEFAULT_PAGE_SIZE;

/// Application configuration
///
/// Every section is optional in the file; missing sections and fields take
/// the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub list: ListConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// REST API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
    pub timeout_secs: u64,
}

/// Query cache lifetimes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Age after which a cached slot is refetched on the next read
    pub stale_time_secs: u64,
    /// Age after which an unused slot is evicted
    pub gc_time_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub default_page_size: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// File holding column preferences. In-memory when unset.
    pub prefs_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for rolling log files. Stdout only when unset.
    pub directory: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_time_secs: 300,
            gc_time_secs: 1800,
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CacheConfig {
    pub fn stale_time_ms(&self) -> i64 {
        (self.stale_time_secs as i64).saturating_mul(1000)
    }

    pub fn gc_time_ms(&self) -> i64 {
        (self.gc_time_secs as i64).saturating_mul(1000)
    }
}
