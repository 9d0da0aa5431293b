//! Location and opening of the ticker mapping cache.

use secfetch_data::DataError;
use secfetch_data::cache::TickerCache;
use std::path::{Path, PathBuf};

/// Get the default cache directory path.
///
/// Uses platform-specific cache directories:
/// - Linux: `~/.cache/secfetch/`
/// - macOS: `~/Library/Caches/secfetch/`
/// - Windows: `%LOCALAPPDATA%\secfetch\`
pub(crate) fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("secfetch")
}

/// Get the default cache database path.
pub(crate) fn default_cache_path() -> PathBuf {
    default_cache_dir().join("secfetch.db")
}

/// Open the cache at `path`, creating the directory if needed.
pub(crate) fn open_cache(path: &Path) -> Result<TickerCache, DataError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    TickerCache::new(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_layout() {
        let path = default_cache_path();
        assert!(path.ends_with("secfetch/secfetch.db"));
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("secfetch.db");

        let cache = open_cache(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cache.stats().unwrap().cik_mappings, 0);
    }
}
