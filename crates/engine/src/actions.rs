//! Pluggable action system for interactive installations
//!
//! Installation paths declare ordered lists of named actions. Each action
//! type is registered in the [`ActionRegistry`] with a factory that
//! validates its declared arguments; at execution time the interactive
//! flow creates and runs them in order.
//!
//! Failure policy differs per action: most report hard errors, the port
//! probe only warns, and the exit action short-circuits the flow without
//! being an error at all. That is why [`Action::execute`] returns an
//! [`ActionOutcome`] rather than a bare success flag.

use crate::{Error, Result};
use hookforge_core::Console;
use hookforge_template::TemplateProcessor;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Result of a successfully executed action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Continue with the remaining actions and the installation
    Continue,
    /// Stop the flow cleanly, without installing and without error
    ExitFlow,
}

/// Context passed to actions during execution
pub struct ActionContext<'a> {
    /// Name of the hook set being installed
    pub hook_name: &'a str,
    /// Directory of the hook set
    pub hook_path: &'a Path,
    /// Resolved target directory
    pub target_dir: &'a Path,
    /// Collected parameter values
    pub inputs: &'a IndexMap<String, String>,
    /// Template processor for rendering messages and copied files
    pub processor: &'a TemplateProcessor,
    /// Output sink
    pub console: &'a dyn Console,
}

/// A single named, side-effecting installation step
pub trait Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error when the action fails fatally; advisory problems
    /// are logged and reported as [`ActionOutcome::Continue`].
    fn execute(&self, context: &ActionContext<'_>) -> Result<ActionOutcome>;
}

type ActionFactory = Box<dyn Fn(&IndexMap<String, Value>) -> Result<Box<dyn Action>>>;

/// Registry mapping action type names to validated constructors
pub struct ActionRegistry {
    factories: IndexMap<String, ActionFactory>,
}

impl ActionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// Create a registry with all built-in actions registered
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("show_message", |args| {
            Ok(Box::new(ShowMessage::from_args(args)?))
        });
        registry.register("exit_with_message", |args| {
            Ok(Box::new(ExitWithMessage::from_args(args)?))
        });
        registry.register("copy_infrastructure", |args| {
            Ok(Box::new(CopyInfrastructure::from_args(args)?))
        });
        registry.register("validate_ports", |args| {
            Ok(Box::new(ValidatePorts::from_args(args)?))
        });
        registry.register("check_runtime_dependency", |args| {
            Ok(Box::new(CheckRuntimeDependency::from_args(args)?))
        });
        registry
    }

    /// Register an action factory under a type name
    pub fn register<F>(&mut self, type_name: &str, factory: F)
    where
        F: Fn(&IndexMap<String, Value>) -> Result<Box<dyn Action>> + 'static,
    {
        self.factories
            .insert(type_name.to_string(), Box::new(factory));
    }

    /// Construct an action by type name
    ///
    /// Returns `None` for an unregistered type; the caller decides how to
    /// report it. A registered factory can still fail on invalid
    /// arguments.
    pub fn create(
        &self,
        type_name: &str,
        args: &IndexMap<String, Value>,
    ) -> Option<Result<Box<dyn Action>>> {
        self.factories.get(type_name).map(|factory| factory(args))
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Deserialize flattened action arguments into a typed arg struct
///
/// Unknown or missing fields fail construction with a configuration
/// error naming the action type.
fn parse_args<T: DeserializeOwned>(type_name: &str, args: &IndexMap<String, Value>) -> Result<T> {
    let object = Value::Object(args.iter().map(|(k, v)| (k.clone(), v.clone())).collect());
    serde_json::from_value(object)
        .map_err(|e| Error::Config(format!("invalid arguments for action '{type_name}': {e}")))
}

// ---------------------------------------------------------------------------
// show_message
// ---------------------------------------------------------------------------

/// Renders and prints a templated message
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShowMessage {
    message: String,
}

impl ShowMessage {
    fn from_args(args: &IndexMap<String, Value>) -> Result<Self> {
        parse_args("show_message", args)
    }
}

impl Action for ShowMessage {
    fn execute(&self, context: &ActionContext<'_>) -> Result<ActionOutcome> {
        let message = context.processor.render_str(&self.message, context.inputs)?;
        context.console.print(&message);
        Ok(ActionOutcome::Continue)
    }
}

// ---------------------------------------------------------------------------
// exit_with_message
// ---------------------------------------------------------------------------

/// Prints a templated message and stops the flow without error
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExitWithMessage {
    message: String,
}

impl ExitWithMessage {
    fn from_args(args: &IndexMap<String, Value>) -> Result<Self> {
        parse_args("exit_with_message", args)
    }
}

impl Action for ExitWithMessage {
    fn execute(&self, context: &ActionContext<'_>) -> Result<ActionOutcome> {
        let message = context.processor.render_str(&self.message, context.inputs)?;
        context.console.print(&message);
        Ok(ActionOutcome::ExitFlow)
    }
}

// ---------------------------------------------------------------------------
// copy_infrastructure
// ---------------------------------------------------------------------------

fn default_text_extensions() -> Vec<String> {
    ["env", "yml", "yaml", "md"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Recursively copies an infrastructure bundle into the target directory
///
/// Files whose extension is in the text-format set are template-rendered;
/// everything else is byte-copied.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyInfrastructure {
    /// Bundle directory, relative to the hook set directory
    source: String,
    /// Destination directory, relative to the target directory
    target: String,
    /// Extensions treated as templated text
    #[serde(default = "default_text_extensions")]
    text_extensions: Vec<String>,
}

impl CopyInfrastructure {
    fn from_args(args: &IndexMap<String, Value>) -> Result<Self> {
        parse_args("copy_infrastructure", args)
    }

    fn is_text_format(&self, path: &Path) -> bool {
        // Dotfiles like `.env` have no extension as far as Path is
        // concerned; match on the trailing name segment instead.
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        self.text_extensions
            .iter()
            .any(|ext| name.ends_with(&format!(".{ext}")))
    }
}

impl Action for CopyInfrastructure {
    fn execute(&self, context: &ActionContext<'_>) -> Result<ActionOutcome> {
        let source_dir = context.hook_path.join(&self.source);
        if !source_dir.is_dir() {
            return Err(Error::ActionFailed {
                action_type: "copy_infrastructure".to_string(),
                message: format!("source directory {} not found", source_dir.display()),
            });
        }

        let target_dir = context.target_dir.join(&self.target);
        std::fs::create_dir_all(&target_dir)?;

        for entry in WalkDir::new(&source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let rel_path = entry
                .path()
                .strip_prefix(&source_dir)
                .map_err(|e| Error::Config(format!("file outside bundle: {e}")))?;
            let target_file = target_dir.join(rel_path);

            if let Some(parent) = target_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            if self.is_text_format(entry.path()) {
                let content = context.processor.render_file(entry.path(), context.inputs)?;
                std::fs::write(&target_file, content)?;
            } else {
                std::fs::copy(entry.path(), &target_file)?;
            }
            debug!(file = %target_file.display(), "Copied infrastructure file");
        }

        context
            .console
            .print(&format!("Infrastructure deployed to {}", target_dir.display()));
        Ok(ActionOutcome::Continue)
    }
}

// ---------------------------------------------------------------------------
// validate_ports
// ---------------------------------------------------------------------------

/// Best-effort probe for ports already in use
///
/// Conflicts produce a warning, never a failure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatePorts {
    ports: Vec<u16>,
}

impl ValidatePorts {
    fn from_args(args: &IndexMap<String, Value>) -> Result<Self> {
        parse_args("validate_ports", args)
    }
}

impl Action for ValidatePorts {
    fn execute(&self, context: &ActionContext<'_>) -> Result<ActionOutcome> {
        let in_use: Vec<u16> = self
            .ports
            .iter()
            .copied()
            .filter(|&port| {
                let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
                TcpStream::connect_timeout(&addr, Duration::from_millis(500)).is_ok()
            })
            .collect();

        if !in_use.is_empty() {
            warn!(ports = ?in_use, "Ports already in use");
            context.console.print(&format!(
                "Warning: ports {in_use:?} are already in use. \
                 Consider stopping the services using them or changing configuration."
            ));
        }

        Ok(ActionOutcome::Continue)
    }
}

// ---------------------------------------------------------------------------
// check_runtime_dependency
// ---------------------------------------------------------------------------

fn default_version_arg() -> String {
    "--version".to_string()
}

/// Probes for an external binary the installation depends on
///
/// A missing binary is fatal: later actions assume it is present.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckRuntimeDependency {
    binary: String,
    #[serde(default = "default_version_arg")]
    version_arg: String,
}

impl CheckRuntimeDependency {
    fn from_args(args: &IndexMap<String, Value>) -> Result<Self> {
        parse_args("check_runtime_dependency", args)
    }
}

impl Action for CheckRuntimeDependency {
    fn execute(&self, context: &ActionContext<'_>) -> Result<ActionOutcome> {
        let path = which::which(&self.binary).map_err(|_| Error::ActionFailed {
            action_type: "check_runtime_dependency".to_string(),
            message: format!(
                "{} is not installed or not on PATH; install it before proceeding",
                self.binary
            ),
        })?;

        // The version probe is advisory; a binary that resolves but
        // cannot report a version still counts as present.
        match duct::cmd(&path, [self.version_arg.as_str()])
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
        {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                context
                    .console
                    .print(&format!("{} is available: {}", self.binary, version.trim()));
            }
            Ok(_) => {
                return Err(Error::ActionFailed {
                    action_type: "check_runtime_dependency".to_string(),
                    message: format!("{} is present but not runnable", self.binary),
                });
            }
            Err(e) => {
                warn!(binary = %self.binary, error = %e, "Could not probe dependency version");
            }
        }

        Ok(ActionOutcome::Continue)
    }
}
