//! XDG directory helpers for config/log locations.

use std::path::PathBuf;

/// Base directory for config.
///
/// Uses `INKPOST_CONFIG_DIR` if set, otherwise `$XDG_CONFIG_HOME/inkpost` or
/// `~/.config/inkpost`.
pub(crate) fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("INKPOST_CONFIG_DIR")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }

    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".config")
        })
        .join("inkpost")
}

/// Base directory for log files.
///
/// Uses `INKPOST_DATA_DIR` if set, otherwise `$XDG_DATA_HOME/inkpost/logs`
/// or `~/.local/share/inkpost/logs`.
pub(crate) fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("INKPOST_DATA_DIR")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir).join("logs");
    }

    std::env::var("XDG_DATA_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".local")
                .join("share")
        })
        .join("inkpost")
        .join("logs")
}
