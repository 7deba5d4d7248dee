//! Platform-specific directory utilities
//!
//! Follows platform conventions for cache and data directories, falling back
//! to `/tmp` when no home directory is known.

use std::path::PathBuf;

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "amongagents")
}

/// Log directory, e.g. `~/.cache/amongagents/logs` on Linux.
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/amongagents"))
        .join("logs")
}

/// Data directory, e.g. `~/.local/share/amongagents` on Linux.
pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/amongagents/data"))
}
