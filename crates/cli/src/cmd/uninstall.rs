//! Uninstall command implementation

use anyhow::{Context, Result};
use hookforge_engine::{InstallType, Installer};
use owo_colors::OwoColorize;

/// Run the uninstall command
pub fn run(hook_set: &str, target: &str, install_type: &str) -> Result<()> {
    let install_type: InstallType = install_type.parse()?;
    let installer = Installer::new(target, install_type)?;

    installer
        .uninstall(hook_set)
        .with_context(|| format!("Failed to uninstall hook set '{hook_set}'"))?;

    println!(
        "{}",
        format!("Successfully uninstalled {hook_set} hooks!").green()
    );
    Ok(())
}
