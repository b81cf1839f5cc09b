//! Settings store
//!
//! The settings file (`settings.json`) is owned by the host tool, not by
//! hookforge: the installer merges hook entries into it and must leave
//! every other key intact, including keys it has never seen. Installer
//! bookkeeping never appears here; it lives in the sibling metadata store.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The host tool's settings file, as far as the installer is concerned
///
/// Only the `hooks` key is interpreted; everything else round-trips
/// through `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsStore {
    /// Event type name -> ordered list of hook entries
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub hooks: IndexMap<String, Vec<Value>>,

    /// Host-tool keys the installer does not interpret
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl SettingsStore {
    /// File name inside the target directory
    pub const FILE_NAME: &'static str = "settings.json";

    /// Path of the settings file under `target_dir`
    #[must_use]
    pub fn path(target_dir: &Path) -> PathBuf {
        target_dir.join(Self::FILE_NAME)
    }

    /// Load the settings file, or start empty if it does not exist
    pub fn load_or_default(target_dir: &Path) -> Result<Self> {
        let path = Self::path(target_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|source| Error::StoreParse { path, source })
    }

    /// Append a hook entry to an event type's list
    ///
    /// Returns the index at which the entry was appended (the pre-append
    /// list length), for recording in the metadata store.
    pub fn append_entry(&mut self, event_type: &str, entry: Value) -> usize {
        let entries = self.hooks.entry(event_type.to_string()).or_default();
        let index = entries.len();
        entries.push(entry);
        index
    }

    /// Remove the entry at `index` from an event type's list
    ///
    /// The event type key is dropped entirely once its list is empty.
    /// Out-of-range indices are ignored; see the positional-identity note
    /// on [`crate::Installer::uninstall`].
    pub fn remove_entry(&mut self, event_type: &str, index: usize) {
        if let Some(entries) = self.hooks.get_mut(event_type) {
            if index < entries.len() {
                entries.remove(index);
            }
            if entries.is_empty() {
                self.hooks.shift_remove(event_type);
            }
        }
    }

    /// Whether the store carries no data at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty() && self.extra.is_empty()
    }

    /// Persist the store under `target_dir`
    ///
    /// An empty store deletes the file instead, restoring the pre-install
    /// absence for targets that never had one.
    pub fn persist(&self, target_dir: &Path) -> Result<()> {
        let path = Self::path(target_dir);
        if self.is_empty() {
            if path.exists() {
                debug!(path = %path.display(), "Removing empty settings file");
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
