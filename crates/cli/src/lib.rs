//! hookforge CLI library
//!
//! This library contains all the CLI logic for hookforge, making it
//! reusable for testing and integration with other tools.

pub mod cmd;
pub mod console;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hookforge - install hook sets into AI coding assistants
#[derive(Parser)]
#[command(name = "hookforge")]
#[command(about = "Install declaratively configured hook sets")]
#[command(version)]
#[command(long_about = "Install declaratively configured hook sets

Hook sets are bundles of event-handler scripts plus a config.yaml,
discovered from a local directory tree. Installing a set copies its
hooks into the target tool's configuration directory and merges its
hook entries into the tool's settings file; uninstalling reverses
both.")]
pub struct Cli {
    /// Directory containing the available hook sets
    #[arg(long, env = "HOOKFORGE_HOOKS_DIR", value_name = "DIR", global = true)]
    pub hooks_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List all available hook sets
    List,

    /// List currently installed hook sets
    Installed,

    /// Show detailed information about a hook set
    Info {
        /// Hook set name
        hook_set: String,
    },

    /// Install a hook set
    Install {
        /// Hook set name
        hook_set: String,

        /// Target tool
        #[arg(default_value = "claude")]
        target: String,

        /// Installation scope
        #[arg(default_value = "local", value_parser = ["local", "global"])]
        install_type: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,

        /// Parameter value, as name=value (repeatable)
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
    },

    /// Uninstall a hook set
    Uninstall {
        /// Hook set name
        hook_set: String,

        /// Target tool
        #[arg(long, default_value = "claude")]
        target: String,

        /// Installation scope
        #[arg(long, default_value = "local", value_parser = ["local", "global"])]
        install_type: String,
    },
}

/// Run the CLI
///
/// User cancellation is reported but mapped to success; every other
/// error propagates to `main`, which exits with a failure status.
pub fn run(cli: Cli) -> Result<()> {
    hookforge_config::logging::init(cli.verbose)?;

    let hooks_root = hookforge_config::hook_sets_root(cli.hooks_dir.as_deref());

    let result = match &cli.command {
        Commands::List => cmd::list::run(&hooks_root),
        Commands::Installed => cmd::installed::run(),
        Commands::Info { hook_set } => cmd::info::run(&hooks_root, hook_set),
        Commands::Install {
            hook_set,
            target,
            install_type,
            force,
            params,
        } => cmd::install::run(&hooks_root, hook_set, target, install_type, *force, params),
        Commands::Uninstall {
            hook_set,
            target,
            install_type,
        } => cmd::uninstall::run(hook_set, target, install_type),
    };

    match result {
        Err(e) if is_cancelled(&e) => {
            println!("Cancelled.");
            Ok(())
        }
        other => other,
    }
}

/// Whether any cause in the error chain is a user cancellation
fn is_cancelled(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<hookforge_core::Error>()
            .is_some_and(|e| matches!(e, hookforge_core::Error::Cancelled))
    })
}
