//! Config loading and persistence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::SaveRecovery;
use crate::paths;

/// Config file problem (unreadable, unparsable, unwritable).
#[derive(Debug, Error)]
#[error("config error: {reason}")]
pub struct ConfigError {
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What happens to a blocked draft after a failed save.
    pub recovery: SaveRecovery,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recovery: SaveRecovery::FailClosed,
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub stdout: bool,
    pub stdout_format: LogFormat,
    pub file: FileLoggingConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stdout: true,
            stdout_format: LogFormat::Compact,
            file: FileLoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub enabled: bool,
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Tree,
    Pretty,
    #[default]
    Compact,
    Json,
}

pub fn config_path() -> PathBuf {
    paths::config_dir().join("config.toml")
}

pub fn load() -> crate::Result<Config> {
    let path = config_path();
    load_from(&path)
}

pub fn load_from(path: &Path) -> crate::Result<Config> {
    let contents = fs::read_to_string(path)
        .map_err(|e| config_error(format!("failed to read {}: {e}", path.display())))?;
    toml::from_str(&contents)
        .map_err(|e| config_error(format!("failed to parse {}: {e}", path.display())).into())
}

/// Load the config, falling back to (and persisting) defaults.
pub fn load_or_init() -> Config {
    let path = config_path();
    if path.exists() {
        match load_from(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                tracing::warn!("config load failed, using defaults: {e}");
                return Config::default();
            }
        }
    }

    let cfg = Config::default();
    if let Err(e) = write_config(&path, &cfg) {
        tracing::warn!("failed to write default config: {e}");
    }
    cfg
}

pub fn write_config(path: &Path, cfg: &Config) -> crate::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| config_error(format!("failed to create {}: {e}", dir.display())))?;
    }
    let contents = toml::to_string_pretty(cfg)
        .map_err(|e| config_error(format!("failed to render config: {e}")))?;
    atomic_write(path, contents.as_bytes())
}

/// Environment overrides, applied after file load:
/// `INKPOST_SERVER` (base url) and `INKPOST_RECOVERY` (`fail_closed`/`retry`).
pub fn apply_env_overrides(cfg: &mut Config) {
    apply_env_overrides_inner(
        cfg,
        std::env::var("INKPOST_SERVER").ok(),
        std::env::var("INKPOST_RECOVERY").ok(),
    );
}

fn apply_env_overrides_inner(cfg: &mut Config, server: Option<String>, recovery: Option<String>) {
    if let Some(url) = server
        && !url.trim().is_empty()
    {
        cfg.server.base_url = url;
    }
    if let Some(raw) = recovery {
        match raw.as_str() {
            "fail_closed" => cfg.recovery = SaveRecovery::FailClosed,
            "retry" => cfg.recovery = SaveRecovery::Retry,
            other => tracing::warn!("unknown INKPOST_RECOVERY value `{other}`, keeping config"),
        }
    }
}

fn atomic_write(path: &Path, data: &[u8]) -> crate::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| config_error("config path missing parent directory".to_string()))?;
    let temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        config_error(format!(
            "failed to create temp file in {}: {e}",
            dir.display()
        ))
    })?;
    fs::write(temp.path(), data)
        .map_err(|e| config_error(format!("failed to write config temp file: {e}")))?;
    temp.persist(path).map_err(|e| {
        config_error(format!(
            "failed to persist config to {}: {e}",
            path.display()
        ))
    })?;
    Ok(())
}

fn config_error(reason: String) -> ConfigError {
    ConfigError { reason }
}
