//! Integration tests for the install/uninstall engine

#![allow(clippy::unwrap_used)]

use hookforge_engine::{Error, Installer, MetadataStore, SettingsStore};
use hookforge_template::TemplateProcessor;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_hook_set(root: &Path, name: &str, event_types: &[&str]) -> PathBuf {
    let dir = root.join(name);
    std::fs::create_dir_all(dir.join("hooks/nested")).unwrap();

    let hooks_yaml: String = event_types
        .iter()
        .map(|event| {
            format!(
                "  {event}:\n    matcher: \"*\"\n    hooks:\n      - type: command\n        command: \"uv run hooks/send_event.py --project {{project_name}}\"\n"
            )
        })
        .collect();

    std::fs::write(
        dir.join("config.yaml"),
        format!(
            "name: {name}\nversion: '1.0'\ndescription: test hook set\ninputs:\n  project_name:\n    prompt: Project name\nhooks:\n{hooks_yaml}"
        ),
    )
    .unwrap();

    std::fs::write(
        dir.join("hooks/send_event.py"),
        "PROJECT = \"{project_name}\"\n",
    )
    .unwrap();
    std::fs::write(dir.join("hooks/nested/util.sh"), "echo {project_name}\n").unwrap();

    dir
}

fn inputs(project: &str) -> IndexMap<String, String> {
    IndexMap::from([("project_name".to_string(), project.to_string())])
}

#[test]
fn install_copies_files_and_merges_settings() {
    let temp = TempDir::new().unwrap();
    let set_dir = write_hook_set(temp.path(), "observability_log", &["PreToolUse", "Stop"]);
    let target = temp.path().join(".claude");
    let installer = Installer::with_target_dir(target.clone());

    installer
        .install(&set_dir, &inputs("demo"), &TemplateProcessor::new())
        .unwrap();

    // Script template rendered, non-script copied verbatim
    assert_eq!(
        std::fs::read_to_string(target.join("hooks/send_event.py")).unwrap(),
        "PROJECT = \"demo\"\n"
    );
    assert_eq!(
        std::fs::read_to_string(target.join("hooks/nested/util.sh")).unwrap(),
        "echo {project_name}\n"
    );

    let settings = SettingsStore::load_or_default(&target).unwrap();
    assert_eq!(settings.hooks["PreToolUse"].len(), 1);
    assert_eq!(
        settings.hooks["PreToolUse"][0]["hooks"][0]["command"],
        serde_json::json!("uv run hooks/send_event.py --project demo")
    );

    let metadata = MetadataStore::load(&target).unwrap().unwrap();
    let record = &metadata.installed_hook_sets["observability_log"];
    assert_eq!(
        record.installed_files,
        vec!["hooks/nested/util.sh", "hooks/send_event.py"]
    );
    assert_eq!(record.hook_entries["PreToolUse"], 0);
    assert_eq!(record.hook_entries["Stop"], 0);
    assert_eq!(record.config.version, "1.0");
}

#[test]
fn install_then_uninstall_restores_absent_stores() {
    let temp = TempDir::new().unwrap();
    let set_dir = write_hook_set(temp.path(), "observability_log", &["PreToolUse"]);
    let target = temp.path().join(".claude");
    let installer = Installer::with_target_dir(target.clone());

    installer
        .install(&set_dir, &inputs("demo"), &TemplateProcessor::new())
        .unwrap();
    installer.uninstall("observability_log").unwrap();

    // Round-trip: both stores are gone, as before install
    assert!(!SettingsStore::path(&target).exists());
    assert!(!MetadataStore::path(&target).exists());
    assert!(!target.join("hooks/send_event.py").exists());
    assert!(!target.join("hooks/nested").exists());
}

#[test]
fn install_then_uninstall_restores_prior_settings_bytes() {
    let temp = TempDir::new().unwrap();
    let set_dir = write_hook_set(temp.path(), "observability_log", &["PreToolUse"]);
    let target = temp.path().join(".claude");
    std::fs::create_dir_all(&target).unwrap();

    // Pre-existing settings written by a prior install of another set,
    // in the store's own formatting.
    let mut prior = SettingsStore::load_or_default(&target).unwrap();
    prior.append_entry("Stop", serde_json::json!({"command": "other"}));
    prior
        .extra
        .insert("model".to_string(), serde_json::json!("opus"));
    prior.persist(&target).unwrap();
    let before = std::fs::read(SettingsStore::path(&target)).unwrap();

    let installer = Installer::with_target_dir(target.clone());
    installer
        .install(&set_dir, &inputs("demo"), &TemplateProcessor::new())
        .unwrap();
    installer.uninstall("observability_log").unwrap();

    let after = std::fs::read(SettingsStore::path(&target)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn uninstall_keeps_settings_holding_only_foreign_keys() {
    let temp = TempDir::new().unwrap();
    let set_dir = write_hook_set(temp.path(), "observability_log", &["PreToolUse"]);
    let target = temp.path().join(".claude");
    std::fs::create_dir_all(&target).unwrap();

    // Host-tool settings with no hooks key at all
    std::fs::write(
        SettingsStore::path(&target),
        r#"{"model": "opus", "permissions": {"allow": ["Bash"]}}"#,
    )
    .unwrap();

    let installer = Installer::with_target_dir(target.clone());
    installer
        .install(&set_dir, &inputs("demo"), &TemplateProcessor::new())
        .unwrap();
    installer.uninstall("observability_log").unwrap();

    // The file survives because the foreign keys do
    let settings = SettingsStore::load_or_default(&target).unwrap();
    assert!(settings.hooks.is_empty());
    assert_eq!(settings.extra["model"], serde_json::json!("opus"));
    assert_eq!(
        settings.extra["permissions"]["allow"],
        serde_json::json!(["Bash"])
    );

    let raw = std::fs::read_to_string(SettingsStore::path(&target)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(!value.as_object().unwrap().contains_key("hooks"));
}

#[test]
fn install_preserves_unrelated_hook_sets() {
    let temp = TempDir::new().unwrap();
    let first = write_hook_set(temp.path(), "first_set", &["PreToolUse"]);
    let second = write_hook_set(temp.path(), "second_set", &["PreToolUse"]);
    let target = temp.path().join(".claude");
    let installer = Installer::with_target_dir(target.clone());
    let processor = TemplateProcessor::new();

    installer.install(&first, &inputs("one"), &processor).unwrap();
    installer.install(&second, &inputs("two"), &processor).unwrap();

    let settings = SettingsStore::load_or_default(&target).unwrap();
    assert_eq!(settings.hooks["PreToolUse"].len(), 2);

    let metadata = MetadataStore::load(&target).unwrap().unwrap();
    assert_eq!(metadata.installed_hook_sets["first_set"].hook_entries["PreToolUse"], 0);
    assert_eq!(metadata.installed_hook_sets["second_set"].hook_entries["PreToolUse"], 1);

    // Removing the first leaves exactly the second's entry
    installer.uninstall("first_set").unwrap();
    let settings = SettingsStore::load_or_default(&target).unwrap();
    assert_eq!(settings.hooks["PreToolUse"].len(), 1);
    assert_eq!(
        settings.hooks["PreToolUse"][0]["hooks"][0]["command"],
        serde_json::json!("uv run hooks/send_event.py --project two")
    );
}

#[test]
fn settings_contain_no_bookkeeping_fields() {
    let temp = TempDir::new().unwrap();
    let set_dir = write_hook_set(temp.path(), "observability_log", &["PreToolUse"]);
    let target = temp.path().join(".claude");
    let installer = Installer::with_target_dir(target.clone());

    installer
        .install(&set_dir, &inputs("demo"), &TemplateProcessor::new())
        .unwrap();

    let raw = std::fs::read_to_string(SettingsStore::path(&target)).unwrap();
    assert!(!raw.contains("_hook_set"));
    assert!(!raw.contains("installed_hook_sets"));
    assert!(!raw.contains("installed_files"));

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["hooks"]);
}

#[test]
fn uninstall_unknown_set_is_not_installed_error() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join(".claude");
    let installer = Installer::with_target_dir(target.clone());

    // No metadata store at all
    assert!(matches!(
        installer.uninstall("missing"),
        Err(Error::NotInstalled { .. })
    ));

    // Metadata store present, name absent
    let set_dir = write_hook_set(temp.path(), "present", &["PreToolUse"]);
    installer
        .install(&set_dir, &inputs("demo"), &TemplateProcessor::new())
        .unwrap();
    assert!(matches!(
        installer.uninstall("missing"),
        Err(Error::NotInstalled { .. })
    ));

    // Nothing was touched
    assert!(target.join("hooks/send_event.py").exists());
    assert!(SettingsStore::path(&target).exists());
}

#[test]
fn uninstall_tolerates_already_missing_files() {
    let temp = TempDir::new().unwrap();
    let set_dir = write_hook_set(temp.path(), "observability_log", &["PreToolUse"]);
    let target = temp.path().join(".claude");
    let installer = Installer::with_target_dir(target.clone());

    installer
        .install(&set_dir, &inputs("demo"), &TemplateProcessor::new())
        .unwrap();
    std::fs::remove_file(target.join("hooks/send_event.py")).unwrap();

    installer.uninstall("observability_log").unwrap();
    assert!(MetadataStore::load(&target).unwrap().is_none());
}

#[test]
fn reinstall_replaces_bookkeeping_record() {
    let temp = TempDir::new().unwrap();
    let set_dir = write_hook_set(temp.path(), "observability_log", &["PreToolUse"]);
    let target = temp.path().join(".claude");
    let installer = Installer::with_target_dir(target.clone());
    let processor = TemplateProcessor::new();

    installer.install(&set_dir, &inputs("one"), &processor).unwrap();
    installer.install(&set_dir, &inputs("two"), &processor).unwrap();

    let metadata = MetadataStore::load(&target).unwrap().unwrap();
    assert_eq!(metadata.installed_hook_sets.len(), 1);
    let record = &metadata.installed_hook_sets["observability_log"];
    assert_eq!(record.inputs["project_name"], "two");
    // The settings list accumulates; reinstall does not deduplicate.
    let settings = SettingsStore::load_or_default(&target).unwrap();
    assert_eq!(settings.hooks["PreToolUse"].len(), 2);
}

#[test]
fn missing_config_aborts_install() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("broken_set");
    std::fs::create_dir_all(dir.join("hooks")).unwrap();
    let target = temp.path().join(".claude");
    let installer = Installer::with_target_dir(target.clone());

    let result = installer.install(&dir, &inputs("demo"), &TemplateProcessor::new());
    assert!(result.is_err());

    // No settings were merged
    assert!(!SettingsStore::path(&target).exists());
}
