//! Installation engine for hookforge
//!
//! This crate contains every component that mutates persistent state:
//! the [`Installer`] (file copies, settings merge, metadata bookkeeping),
//! the two persisted stores, the pluggable action system, and the
//! interactive installation flow that orchestrates them.

pub mod actions;
pub mod error;
pub mod installer;
pub mod interactive;
pub mod metadata;
pub mod settings;

pub use actions::{Action, ActionContext, ActionOutcome, ActionRegistry};
pub use error::{Error, Result};
pub use installer::{resolve_target_dir, InstallType, Installer};
pub use interactive::{FlowOutcome, InteractiveInstaller};
pub use metadata::{InstalledHookSet, MetadataStore};
pub use settings::SettingsStore;
