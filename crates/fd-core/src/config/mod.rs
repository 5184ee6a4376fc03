pub mod app_config;

pub use app_config::{ApiConfig, AppConfig, CacheConfig, ListConfig, LoggingConfig, StorageConfig};
