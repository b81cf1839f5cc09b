//! Logging configuration for the hookforge CLI
//!
//! Terminal output via tracing, with `RUST_LOG` override support.

use crate::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable debug level logging
pub fn init(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    // Allows overriding with RUST_LOG env var
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("hookforge={level}")))
        .expect("failed to create default env filter");

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_ansi(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stdout_layer).init();

    Ok(())
}
