//! Configuration management for hookforge
//!
//! This crate handles:
//! - Hook set configuration loading and validation
//! - Installation path and action declarations
//! - Hook set discovery from the hook-sets root directory
//! - Logging initialization

pub mod discovery;
pub mod hookset;
pub mod logging;
pub mod paths;

// Re-export error types from core
pub use hookforge_core::{Error, Result};

// Re-export main types
pub use discovery::{discover_hook_sets, hook_set_dir, hook_sets_root, CONFIG_FILE, HOOKS_DIR_ENV};
pub use hookset::{HookSetConfig, HookSetSnapshot, InputSpec, InteractiveConfig};
pub use paths::{ActionSpec, PathConfig, PathType};
