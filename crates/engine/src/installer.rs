//! Hook installation logic
//!
//! The installer is the only component that mutates persistent state: it
//! copies hook files into the target directory, merges rendered hook
//! entries into the settings store, records what it did in the metadata
//! store, and reverses both on uninstall.

use crate::metadata::{InstalledHookSet, MetadataStore};
use crate::settings::SettingsStore;
use crate::{Error, Result};
use hookforge_config::{HookSetConfig, CONFIG_FILE};
use hookforge_template::TemplateProcessor;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Subdirectory of the target that receives hook files
const HOOKS_SUBDIR: &str = "hooks";

/// File extension of hook scripts that get template-rendered on copy
const SCRIPT_TEMPLATE_EXT: &str = "py";

/// Installation scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallType {
    /// Install into the current project (`./.claude`)
    Local,
    /// Install into the user's home directory (`~/.claude`)
    Global,
}

impl InstallType {
    /// Lowercase name, as used on the command line
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Global => "global",
        }
    }
}

impl FromStr for InstallType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(Self::Local),
            "global" => Ok(Self::Global),
            other => Err(Error::Config(format!("invalid install type: {other}"))),
        }
    }
}

impl std::fmt::Display for InstallType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the target directory for a host tool and installation scope
///
/// # Errors
///
/// Returns [`Error::UnsupportedTarget`] for any target other than
/// `claude`, and an error if the relevant base directory cannot be
/// determined.
pub fn resolve_target_dir(target: &str, install_type: InstallType) -> Result<PathBuf> {
    if target != "claude" {
        return Err(Error::UnsupportedTarget {
            target: target.to_string(),
        });
    }
    let base = match install_type {
        InstallType::Global => dirs::home_dir()
            .ok_or_else(|| Error::Config("could not determine home directory".to_string()))?,
        InstallType::Local => std::env::current_dir()?,
    };
    Ok(base.join(".claude"))
}

/// Handles installation of hook sets into a target directory
pub struct Installer {
    target_dir: PathBuf,
}

impl Installer {
    /// Create an installer for a host tool and installation scope
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTarget`] for unknown targets.
    pub fn new(target: &str, install_type: InstallType) -> Result<Self> {
        Ok(Self {
            target_dir: resolve_target_dir(target, install_type)?,
        })
    }

    /// Create an installer against an explicit target directory
    #[must_use]
    pub fn with_target_dir(target_dir: PathBuf) -> Self {
        Self { target_dir }
    }

    /// The resolved target directory
    #[must_use]
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Install a hook set into the target directory
    ///
    /// Copies the hook set's `hooks/` subtree into the target (rendering
    /// script templates with `inputs`), appends rendered hook entries to
    /// the settings store, and records an installation record in the
    /// metadata store.
    ///
    /// This operation is not transactional: an error part-way through
    /// leaves already written files in place.
    ///
    /// # Errors
    ///
    /// Returns an error on any I/O, parse, or rendering failure.
    pub fn install(
        &self,
        hook_set_path: &Path,
        inputs: &IndexMap<String, String>,
        processor: &TemplateProcessor,
    ) -> Result<()> {
        let hooks_dir = self.target_dir.join(HOOKS_SUBDIR);
        std::fs::create_dir_all(&hooks_dir)?;

        let config = HookSetConfig::load(&hook_set_path.join(CONFIG_FILE))?;
        let hook_set_name = hook_set_path
            .file_name()
            .map_or_else(|| config.name.clone(), |n| n.to_string_lossy().into_owned());

        info!(hook_set = %hook_set_name, target = %self.target_dir.display(), "Installing hook set");

        let installed_files = self.copy_hook_files(hook_set_path, inputs, processor)?;

        let mut settings = SettingsStore::load_or_default(&self.target_dir)?;
        let mut metadata = MetadataStore::load_or_default(&self.target_dir)?;

        let mut hook_entries = IndexMap::new();
        for (event_type, entry_template) in &config.hooks {
            let entry = processor.render_data(entry_template, inputs)?;
            let index = settings.append_entry(event_type, entry);
            hook_entries.insert(event_type.clone(), index);
            debug!(event_type = %event_type, index, "Appended hook entry");
        }

        // Reinstalling replaces the bookkeeping record wholesale; files
        // from a previous install with a different file list are not
        // removed.
        metadata.installed_hook_sets.insert(
            hook_set_name,
            InstalledHookSet {
                installed_files,
                hook_entries,
                inputs: inputs.clone(),
                config: config.snapshot(),
            },
        );

        settings.persist(&self.target_dir)?;
        metadata.persist(&self.target_dir)?;

        Ok(())
    }

    /// Copy the hook set's `hooks/` subtree into the target hooks directory
    ///
    /// Returns the target-relative paths written, in write order.
    fn copy_hook_files(
        &self,
        hook_set_path: &Path,
        inputs: &IndexMap<String, String>,
        processor: &TemplateProcessor,
    ) -> Result<Vec<String>> {
        let source_hooks = hook_set_path.join(HOOKS_SUBDIR);
        let target_hooks = self.target_dir.join(HOOKS_SUBDIR);
        let mut installed_files = Vec::new();

        if !source_hooks.is_dir() {
            return Ok(installed_files);
        }

        for entry in WalkDir::new(&source_hooks)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let rel_path = entry
                .path()
                .strip_prefix(&source_hooks)
                .map_err(|e| Error::Config(format!("hook file outside hooks subtree: {e}")))?;
            let target_file = target_hooks.join(rel_path);

            if let Some(parent) = target_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let is_script_template = entry
                .path()
                .extension()
                .is_some_and(|ext| ext == SCRIPT_TEMPLATE_EXT);
            if is_script_template {
                let content = processor.render_file(entry.path(), inputs)?;
                std::fs::write(&target_file, content)?;
            } else {
                std::fs::copy(entry.path(), &target_file)?;
            }

            let recorded = Path::new(HOOKS_SUBDIR).join(rel_path);
            debug!(file = %recorded.display(), "Installed hook file");
            installed_files.push(recorded.to_string_lossy().into_owned());
        }

        Ok(installed_files)
    }

    /// Remove an installed hook set
    ///
    /// Deletes the recorded files, prunes emptied directories, removes
    /// this set's settings entries, and drops the installation record.
    /// Both stores are deleted entirely once they carry no data.
    ///
    /// Settings entries are located by the list index recorded at install
    /// time; out-of-band edits to the settings file between install and
    /// uninstall can desynchronize those indices and cause the wrong
    /// entry to be removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInstalled`] when no metadata store exists or
    /// the name is absent from it; no state is mutated in that case.
    pub fn uninstall(&self, hook_set_name: &str) -> Result<()> {
        let mut metadata =
            MetadataStore::load(&self.target_dir)?.ok_or_else(|| Error::NotInstalled {
                name: hook_set_name.to_string(),
            })?;
        let record = metadata
            .installed_hook_sets
            .shift_remove(hook_set_name)
            .ok_or_else(|| Error::NotInstalled {
                name: hook_set_name.to_string(),
            })?;

        info!(hook_set = %hook_set_name, target = %self.target_dir.display(), "Uninstalling hook set");

        for rel_path in &record.installed_files {
            let path = self.target_dir.join(rel_path);
            match std::fs::remove_file(&path) {
                Ok(()) => debug!(file = %path.display(), "Removed hook file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!(file = %path.display(), "Hook file already missing");
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.prune_empty_dirs();

        let mut settings = SettingsStore::load_or_default(&self.target_dir)?;
        for (event_type, index) in &record.hook_entries {
            settings.remove_entry(event_type, *index);
        }

        settings.persist(&self.target_dir)?;
        metadata.persist(&self.target_dir)?;

        Ok(())
    }

    /// Remove now-empty directories under the hooks tree, bottom-up
    ///
    /// Non-empty directories are left alone; the hooks directory itself
    /// is removed last if emptied.
    fn prune_empty_dirs(&self) {
        let hooks_dir = self.target_dir.join(HOOKS_SUBDIR);
        for entry in WalkDir::new(&hooks_dir)
            .contents_first(true)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_dir())
        {
            // remove_dir fails on non-empty directories, which is the
            // tolerance we want here.
            let _ = std::fs::remove_dir(entry.path());
        }
    }
}
