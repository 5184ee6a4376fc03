//! # Configuration Loader / 配置加载器
//!
//! Pure data loading: read the TOML file and map it onto [`AppConfig`].
//! Sections and fields absent from the file take the serde defaults of
//! `AppConfig`; nothing else is validated here.
//! 仅做纯数据加载，缺失的字段使用 `AppConfig` 的默认值。

use std::path::{Path, PathBuf};

use anyhow::Context;
use fd_core::AppConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "FIRMDESK_CONFIG";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// `<config dir>/firmdesk/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("firmdesk").join("config.toml"))
}

/// Resolve the configuration of this process.
///
/// An explicit path (from [`CONFIG_ENV_VAR`]) must exist. The default path is
/// optional: when there is no file, defaults apply.
pub fn resolve_config() -> anyhow::Result<AppConfig> {
    let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    resolve_config_from(explicit, default_config_path())
}

fn resolve_config_from(
    explicit: Option<PathBuf>,
    default_path: Option<PathBuf>,
) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(&path);
    }
    match default_path {
        Some(path) if path.exists() => load_config(&path),
        _ => Ok(AppConfig::default()),
    }
}
