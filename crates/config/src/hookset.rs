//! Hook set configuration structures
//!
//! A hook set directory carries a `config.yaml` describing the set: display
//! metadata, supported targets, declared input parameters, the hook entry
//! templates merged into the host tool's settings, and an optional
//! interactive installation flow.

use crate::paths::PathConfig;
use hookforge_core::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static configuration of a hook set, loaded from its `config.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookSetConfig {
    /// Hook set name (unique within the hook-sets root)
    pub name: String,

    /// Version string for display
    pub version: String,

    /// Human-readable description
    pub description: String,

    /// Host tools this set supports (defaults to `["claude"]`)
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,

    /// Declared input parameters, in declaration order
    #[serde(default)]
    pub inputs: IndexMap<String, InputSpec>,

    /// Event type name -> hook entry template
    ///
    /// Entry templates are arbitrary nested structures containing
    /// `{param}` placeholders, rendered at install time.
    #[serde(default)]
    pub hooks: IndexMap<String, serde_json::Value>,

    /// Interactive installation flow, if this set declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive_install: Option<InteractiveConfig>,
}

impl HookSetConfig {
    /// Load a hook set configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as a
    /// valid hook set configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            Error::Config(format!("invalid hook set config {}: {e}", path.display()))
        })
    }

    /// Snapshot of the display metadata, recorded at install time
    #[must_use]
    pub fn snapshot(&self) -> HookSetSnapshot {
        HookSetSnapshot {
            name: self.name.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
        }
    }
}

/// Declared input parameter of a hook set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSpec {
    /// Prompt text shown when asking for this parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Longer description, shown by `hookforge info`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default value substituted when the parameter is not prompted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Whether the parameter must be provided (default: true)
    #[serde(default = "default_required")]
    pub required: bool,
}

impl InputSpec {
    /// Prompt text, falling back to a generic prompt for `name`
    #[must_use]
    pub fn prompt_text(&self, name: &str) -> String {
        self.prompt
            .clone()
            .unwrap_or_else(|| format!("Enter {name}"))
    }
}

/// Interactive installation flow declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractiveConfig {
    /// Text shown before presenting path choices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_install_prompt: Option<String>,

    /// Named installation paths, in declaration order
    #[serde(default)]
    pub paths: IndexMap<String, PathConfig>,
}

/// Display metadata snapshot persisted in the metadata store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookSetSnapshot {
    pub name: String,
    pub version: String,
    pub description: String,
}

fn default_targets() -> Vec<String> {
    vec!["claude".to_string()]
}

fn default_required() -> bool {
    true
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    const SAMPLE: &str = r#"
name: observability_log
version: "1.0.0"
description: Send hook events to a log backend
targets:
  - claude
inputs:
  project_name:
    prompt: Project name
    required: true
  log_url:
    prompt: Log endpoint URL
    default: http://localhost:8086
    required: false
hooks:
  PreToolUse:
    command: "uv run hooks/send_event.py --project {project_name} --url {log_url}"
"#;

    #[test]
    fn test_parse_full_config() {
        let config: HookSetConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(config.name, "observability_log");
        assert_eq!(config.targets, vec!["claude"]);
        assert_eq!(config.inputs.len(), 2);
        assert!(config.inputs["project_name"].required);
        assert!(!config.inputs["log_url"].required);
        assert_eq!(
            config.inputs["log_url"].default.as_deref(),
            Some("http://localhost:8086")
        );
        assert!(config.hooks.contains_key("PreToolUse"));
        assert!(config.interactive_install.is_none());
    }

    #[test]
    fn test_required_defaults_to_true() {
        let spec: InputSpec = serde_yaml::from_str("prompt: Token").unwrap();
        assert!(spec.required);
    }

    #[test]
    fn test_targets_default_to_claude() {
        let config: HookSetConfig = serde_yaml::from_str(
            "name: a\nversion: '1'\ndescription: d\n",
        )
        .unwrap();
        assert_eq!(config.targets, vec!["claude"]);
    }

    #[test]
    fn test_snapshot_copies_display_metadata() {
        let config: HookSetConfig = serde_yaml::from_str(SAMPLE).unwrap();
        let snapshot = config.snapshot();
        assert_eq!(snapshot.name, "observability_log");
        assert_eq!(snapshot.version, "1.0.0");
    }
}
