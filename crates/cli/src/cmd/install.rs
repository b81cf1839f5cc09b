//! Install command implementation
//!
//! Hook sets that declare an interactive flow are handed to the engine's
//! interactive installer; everything else runs the standard flow here:
//! collect parameters from `--param` flags and prompts, confirm, install.

use crate::console::TermConsole;
use anyhow::{bail, Context, Result};
use hookforge_config::HookSetConfig;
use hookforge_core::Console;
use hookforge_engine::{
    ActionRegistry, InstallType, Installer, InteractiveInstaller,
};
use hookforge_template::TemplateProcessor;
use indexmap::IndexMap;
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::debug;

/// Run the install command
pub fn run(
    hooks_root: &Path,
    hook_set: &str,
    target: &str,
    install_type: &str,
    force: bool,
    params: &[String],
) -> Result<()> {
    let hook_sets = hookforge_config::discover_hook_sets(hooks_root);

    let Some(config) = hook_sets.get(hook_set) else {
        println!("Available hook sets:");
        for name in hook_sets.keys() {
            println!("  - {name}");
        }
        bail!("Hook set '{hook_set}' not found");
    };

    let install_type: InstallType = install_type.parse()?;
    let hook_path = hookforge_config::hook_set_dir(hooks_root, hook_set);
    let console = TermConsole;
    let processor = TemplateProcessor::new();

    // Interactive hook sets drive their own flow
    if config.interactive_install.is_some() {
        let installer = Installer::new(target, install_type)?;
        let registry = ActionRegistry::with_builtins();
        let interactive = InteractiveInstaller::new(
            hook_set, config, &hook_path, &installer, &registry, &processor, &console, force,
        );
        let outcome = interactive.run();
        if !outcome.is_success() {
            bail!("Installation of '{hook_set}' aborted");
        }
        return Ok(());
    }

    let target = select_target(&console, config, target)?;
    let inputs = collect_inputs(&console, config, params)?;

    if !force {
        println!();
        println!("{}", "Installation Summary:".bold());
        println!("  Hook Set: {hook_set}");
        println!("  Target: {target}");
        println!("  Install Type: {install_type}");
        for (name, value) in &inputs {
            println!("  {name}: {value}");
        }

        if !console.confirm("Proceed with installation?")? {
            println!("Installation cancelled.");
            return Ok(());
        }
    }

    let installer = Installer::new(&target, install_type)?;
    installer
        .install(&hook_path, &inputs, &processor)
        .with_context(|| format!("Failed to install hook set '{hook_set}'"))?;

    println!(
        "{}",
        format!("Successfully installed {hook_set} hooks!").green()
    );
    Ok(())
}

/// Re-select the target interactively when the requested one is not
/// supported by the hook set
fn select_target(console: &dyn Console, config: &HookSetConfig, target: &str) -> Result<String> {
    if config.targets.iter().any(|t| t == target) {
        return Ok(target.to_string());
    }

    println!(
        "{}",
        format!("Target '{target}' is not supported by this hook set.").yellow()
    );
    let choice = console.choose("Supported targets:", &config.targets)?;
    Ok(config.targets[choice].clone())
}

/// Merge `--param name=value` flags with interactive prompts for the rest
fn collect_inputs(
    console: &dyn Console,
    config: &HookSetConfig,
    params: &[String],
) -> Result<IndexMap<String, String>> {
    let mut inputs = IndexMap::new();

    for param in params {
        let Some((name, value)) = param.split_once('=') else {
            bail!("Invalid --param '{param}': expected name=value");
        };
        inputs.insert(name.to_string(), value.to_string());
    }

    for (name, spec) in &config.inputs {
        if inputs.contains_key(name) {
            continue;
        }
        debug!(input = %name, "Prompting for missing input");
        let value = console.prompt(&spec.prompt_text(name), spec.default.as_deref())?;
        inputs.insert(name.clone(), value);
    }

    Ok(inputs)
}
