//! Installed command implementation
//!
//! Shows hook sets recorded in the local and global metadata stores.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use hookforge_engine::{resolve_target_dir, InstallType, MetadataStore};
use owo_colors::OwoColorize;

/// Run the installed command
pub fn run() -> Result<()> {
    let mut found_any = false;

    for install_type in [InstallType::Local, InstallType::Global] {
        let target_dir = resolve_target_dir("claude", install_type)?;
        let Some(metadata) = MetadataStore::load(&target_dir)? else {
            continue;
        };
        if metadata.installed_hook_sets.is_empty() {
            continue;
        }
        found_any = true;

        let location = match install_type {
            InstallType::Local => "Local",
            InstallType::Global => "Global",
        };
        println!();
        println!(
            "{} ({})",
            format!("{location} Installation").bright_cyan().bold(),
            target_dir.display()
        );

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(["Name", "Version", "Description", "Files"]);
        for (name, record) in &metadata.installed_hook_sets {
            table.add_row([
                name.clone(),
                record.config.version.clone(),
                record.config.description.clone(),
                format!("{} files", record.installed_files.len()),
            ]);
        }
        println!("{table}");
    }

    if !found_any {
        println!("{}", "No hook sets are currently installed.".yellow());
    }

    Ok(())
}
