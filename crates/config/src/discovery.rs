//! Hook set discovery
//!
//! Hook sets live as subdirectories of a single flat root directory, each
//! containing a `config.yaml` and a `hooks/` subtree. Directory names are
//! the hook set names; there is no nesting and no remote registry.

use crate::hookset::HookSetConfig;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration file name inside each hook set directory
pub const CONFIG_FILE: &str = "config.yaml";

/// Environment variable overriding the hook-sets root directory
pub const HOOKS_DIR_ENV: &str = "HOOKFORGE_HOOKS_DIR";

/// Resolve the hook-sets root directory
///
/// Precedence: explicit flag, then `HOOKFORGE_HOOKS_DIR`, then `./hooks`.
#[must_use]
pub fn hook_sets_root(flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Ok(dir) = std::env::var(HOOKS_DIR_ENV) {
        return PathBuf::from(dir);
    }
    PathBuf::from("hooks")
}

/// Directory of a named hook set under `root`
#[must_use]
pub fn hook_set_dir(root: &Path, name: &str) -> PathBuf {
    root.join(name)
}

/// Discover all hook sets under `root`
///
/// Subdirectories without a readable, valid `config.yaml` are skipped
/// with a logged warning; a missing root yields an empty map.
#[must_use]
pub fn discover_hook_sets(root: &Path) -> IndexMap<String, HookSetConfig> {
    let mut hook_sets = IndexMap::new();

    let Ok(entries) = std::fs::read_dir(root) else {
        return hook_sets;
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    // read_dir order is platform dependent
    dirs.sort();

    for dir in dirs {
        let config_file = dir.join(CONFIG_FILE);
        if !config_file.is_file() {
            continue;
        }
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match HookSetConfig::load(&config_file) {
            Ok(config) => {
                hook_sets.insert(name, config);
            }
            Err(e) => {
                warn!(hook_set = %name, error = %e, "Skipping hook set with invalid config");
            }
        }
    }

    hook_sets
}
