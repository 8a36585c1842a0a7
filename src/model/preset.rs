//! Named transformation presets persisted to a single JSON file

use super::transform::{to_tab_json, TransformationConfig};
use crate::error::WranglerError;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Preset overwritten on every clean exit; cannot be deleted by the user
pub const LAST_PRESET_NAME: &str = "last";

/// Presets by name, backed by one file
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
    presets: BTreeMap<String, TransformationConfig>,
}

impl PresetStore {
    /// Create an empty store that saves to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            presets: BTreeMap::new(),
        }
    }

    /// Load presets from `path`.
    ///
    /// A missing or unparsable file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                debug!("no presets loaded from {}: {}", path.display(), e);
                return Self::new(path);
            }
        };

        match serde_json::from_str::<BTreeMap<String, TransformationConfig>>(&contents) {
            Ok(presets) => {
                info!("loaded {} presets from {}", presets.len(), path.display());
                Self { path, presets }
            }
            Err(e) => {
                warn!("ignoring unreadable presets file {}: {}", path.display(), e);
                Self::new(path)
            }
        }
    }

    /// Write every preset to the backing file.
    ///
    /// The file is written to a temporary sibling first and renamed into
    /// place, so a failed save never leaves a truncated file behind.
    pub fn save(&self) -> Result<(), WranglerError> {
        let json = to_tab_json(&self.presets)?;
        write_atomic(&self.path, json.as_bytes())?;
        info!("saved {} presets to {}", self.presets.len(), self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&TransformationConfig> {
        self.presets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// Store a copy of `config` under `name`
    pub fn insert(&mut self, name: &str, config: &TransformationConfig) {
        self.presets.insert(name.to_string(), config.clone());
    }

    /// Delete a preset. The reserved `last` preset is never removed.
    pub fn remove(&mut self, name: &str) -> bool {
        if name == LAST_PRESET_NAME {
            return false;
        }
        self.presets.remove(name).is_some()
    }

    /// Preset names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.presets.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Write `contents` to `path` through a temporary file in the same directory
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), WranglerError> {
    let to_error = |source: std::io::Error| WranglerError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(to_error)?;
    file.write_all(contents).map_err(to_error)?;
    file.as_file().sync_all().map_err(to_error)?;
    file.persist(path).map_err(|e| to_error(e.error))?;
    Ok(())
}
