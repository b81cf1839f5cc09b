//! List command implementation
//!
//! Lists all hook sets available under the hook-sets root.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;
use std::path::Path;

/// Run the list command
pub fn run(hooks_root: &Path) -> Result<()> {
    let hook_sets = hookforge_config::discover_hook_sets(hooks_root);

    if hook_sets.is_empty() {
        println!(
            "No hook sets found under {}.",
            hooks_root.display().yellow()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(["Name", "Description", "Inputs", "Targets"]);

    for (name, config) in &hook_sets {
        let inputs = config
            .inputs
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row([
            name.clone(),
            config.description.clone(),
            inputs,
            config.targets.join(", "),
        ]);
    }

    println!("{}", "Available Hook Sets".bright_white().bold());
    println!("{table}");
    Ok(())
}
