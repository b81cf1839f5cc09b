//! Metadata store
//!
//! Installer-private bookkeeping, persisted as `.hook_metadata.json` next
//! to the settings file. An earlier revision of this tool tagged entries
//! inside settings.json itself; the host tool rejects unknown fields, so
//! all bookkeeping lives here instead.

use crate::{Error, Result};
use hookforge_config::HookSetSnapshot;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Record of one installed hook set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstalledHookSet {
    /// Target-relative paths written during install, in write order
    pub installed_files: Vec<String>,

    /// Event type -> index at which this set's entry was appended
    pub hook_entries: IndexMap<String, usize>,

    /// Resolved parameter values used at install time
    pub inputs: IndexMap<String, String>,

    /// Snapshot of the hook set's display metadata
    pub config: HookSetSnapshot,
}

/// Installer-private persisted state for a target directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataStore {
    /// Hook set name -> installation record
    #[serde(default)]
    pub installed_hook_sets: IndexMap<String, InstalledHookSet>,
}

impl MetadataStore {
    /// File name inside the target directory
    pub const FILE_NAME: &'static str = ".hook_metadata.json";

    /// Path of the metadata file under `target_dir`
    #[must_use]
    pub fn path(target_dir: &Path) -> PathBuf {
        target_dir.join(Self::FILE_NAME)
    }

    /// Load the metadata file if it exists
    pub fn load(target_dir: &Path) -> Result<Option<Self>> {
        let path = Self::path(target_dir);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let store =
            serde_json::from_str(&content).map_err(|source| Error::StoreParse { path, source })?;
        Ok(Some(store))
    }

    /// Load the metadata file, or start empty if it does not exist
    pub fn load_or_default(target_dir: &Path) -> Result<Self> {
        Ok(Self::load(target_dir)?.unwrap_or_default())
    }

    /// Persist the store under `target_dir`
    ///
    /// When no hook sets remain recorded, the file is deleted instead.
    pub fn persist(&self, target_dir: &Path) -> Result<()> {
        let path = Self::path(target_dir);
        if self.installed_hook_sets.is_empty() {
            if path.exists() {
                debug!(path = %path.display(), "Removing empty metadata file");
                std::fs::remove_file(&path)?;
            }
            return Ok(());
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|source| Error::StoreParse { path: path.clone(), source })?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}
