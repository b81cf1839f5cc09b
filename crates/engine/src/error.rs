//! Error types for the installation engine
//!
//! The taxonomy follows the operational categories: configuration errors,
//! not-installed errors, and I/O errors are all fatal for the operation in
//! progress; advisory conditions are logged by the components themselves
//! and never surface here.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the installation engine
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing or writing a persisted JSON store
    #[error("Failed to parse {}: {source}", path.display())]
    StoreParse {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error (malformed hook set config, bad action arguments)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Target tool name is not known to the installer
    #[error("Unsupported target: {target}")]
    UnsupportedTarget { target: String },

    /// Uninstall referenced a hook set that is not installed
    #[error("Hook set '{name}' is not installed")]
    NotInstalled { name: String },

    /// Action type missing from the registry at execution time
    #[error("Unknown action type: {action_type}")]
    UnknownAction { action_type: String },

    /// A fatal action reported failure
    #[error("Action {action_type} failed: {message}")]
    ActionFailed {
        action_type: String,
        message: String,
    },

    /// Template rendering error
    #[error(transparent)]
    Template(#[from] hookforge_template::TemplateError),

    /// Error propagated from core (console interaction, shared I/O)
    #[error(transparent)]
    Core(#[from] hookforge_core::Error),
}

impl Error {
    /// Whether this error represents user cancellation
    ///
    /// Cancellation is a clean abort, not a failure.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Core(hookforge_core::Error::Cancelled))
    }
}
