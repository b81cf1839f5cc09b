//! Template processing for hookforge
//!
//! Hook files and hook entry templates carry `{param}` placeholders and,
//! optionally, full expression-engine syntax. This crate provides the
//! [`TemplateProcessor`] that resolves both.

pub mod processor;

pub use processor::TemplateProcessor;

use thiserror::Error;

/// Template processing errors
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Error reading a template file
    #[error("Failed to read template {}: {source}", path.display())]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template engine rendering error
    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

/// Result type alias for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
