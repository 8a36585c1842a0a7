//! Per-user configuration directory
//!
//! Everything lives under `$XDG_CONFIG_HOME/table-wrangler/` or
//! `~/.config/table-wrangler/`:
//! - `presets` - saved transformations (JSON)
//! - `logs/` - daily rotated log files

use crate::error::WranglerError;
use crate::model::PresetStore;
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const APP_DIR: &str = "table-wrangler";
const PRESETS_FILE: &str = "presets";
const LOGS_DIR: &str = "logs";

#[derive(Debug, Clone)]
pub struct Config {
    dir: PathBuf,
}

impl Config {
    /// Base config directory, `None` when no home directory is known
    pub fn config_dir() -> Option<PathBuf> {
        env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|config| config.join(APP_DIR))
    }

    /// Locate the config directory and create it if needed
    pub fn ensure() -> Result<Self, WranglerError> {
        let dir = Self::config_dir().ok_or(WranglerError::NoConfigDir)?;
        Self::ensure_at(dir)
    }

    /// Use `dir` as the config directory, creating it if needed
    pub fn ensure_at(dir: impl Into<PathBuf>) -> Result<Self, WranglerError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| WranglerError::ConfigDir {
            path: dir.clone(),
            source,
        })?;
        debug!("config directory ready at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn presets_path(&self) -> PathBuf {
        self.dir.join(PRESETS_FILE)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.dir.join(LOGS_DIR)
    }

    /// Best-effort load of the preset file
    pub fn load_presets(&self) -> PresetStore {
        PresetStore::load(self.presets_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_at_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join(APP_DIR);

        let config = Config::ensure_at(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(config.presets_path(), dir.join("presets"));
        assert_eq!(config.logs_dir(), dir.join("logs"));
    }

    #[test]
    fn test_ensure_at_fails_on_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("taken");
        fs::write(&file, "").unwrap();

        assert!(matches!(
            Config::ensure_at(&file),
            Err(WranglerError::ConfigDir { .. })
        ));
    }

    #[test]
    fn test_fresh_directory_has_no_presets() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::ensure_at(tmp.path()).unwrap();

        assert!(config.load_presets().is_empty());
    }
}
