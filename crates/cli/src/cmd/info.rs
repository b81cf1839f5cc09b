//! Info command implementation
//!
//! Shows a hook set's metadata and declared parameters, with usage
//! examples for non-interactive installation.

use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use std::path::Path;

/// Run the info command
pub fn run(hooks_root: &Path, hook_set: &str) -> Result<()> {
    let hook_sets = hookforge_config::discover_hook_sets(hooks_root);

    let Some(config) = hook_sets.get(hook_set) else {
        println!("Available hook sets:");
        for name in hook_sets.keys() {
            println!("  - {name}");
        }
        bail!("Hook set '{hook_set}' not found");
    };

    println!();
    println!("{} {}", "Hook Set:".bold(), hook_set.bright_cyan());
    println!("{} {}", "Description:".bold(), config.description);
    println!("{} {}", "Version:".bold(), config.version);
    println!("{} {}", "Targets:".bold(), config.targets.join(", "));

    if !config.inputs.is_empty() {
        println!();
        println!("{}", "Parameters:".bold());
        for (name, spec) in &config.inputs {
            let mut status = if spec.required {
                "required".red().to_string()
            } else {
                "optional".green().to_string()
            };
            if let Some(default) = &spec.default {
                status.push_str(&format!(" (default: {default})"));
            }
            println!("  {name:24} {status}");
            if let Some(description) = &spec.description {
                println!("  {:24} {description}", "");
            }
        }
    }

    println!();
    println!("{}", "Usage:".bold());
    let params: String = config
        .inputs
        .iter()
        .filter(|(_, spec)| spec.required)
        .map(|(name, _)| format!(" --param {name}=<value>"))
        .collect();
    println!("  hookforge install {hook_set} claude local{params}");
    println!("  hookforge install {hook_set} claude global{params}");

    Ok(())
}
