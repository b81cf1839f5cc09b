//! Interactive installation flow
//!
//! Hook sets with complex setup declare an `interactive_install` section:
//! the flow presents the configured paths, collects parameters according
//! to the chosen path's type, runs the path's actions in order, and then
//! delegates to the standard [`Installer`] unless the path exits early.
//!
//! The flow moves through presenting the choice, collecting parameters,
//! executing actions, and installing; any failure or cancellation lands
//! in an aborted outcome, and an exit action lands in a clean early exit.

use crate::actions::{ActionContext, ActionOutcome, ActionRegistry};
use crate::installer::Installer;
use crate::{Error, Result};
use hookforge_config::{HookSetConfig, PathConfig, PathType};
use hookforge_core::Console;
use hookforge_template::TemplateProcessor;
use indexmap::IndexMap;
use std::path::Path;
use tracing::error;

/// Pre-set connection parameters for the visualization hook set's
/// Docker deployment path. The bundled containers are configured with
/// exactly these values, so they override any declared defaults.
const DOCKER_DEPLOY_PRESETS: [(&str, &str); 4] = [
    ("influxdb_token", "claude-observability-token"),
    ("influxdb_url", "http://localhost:8086"),
    ("influxdb_org", "events-org"),
    ("influxdb_bucket", "application-events"),
];

/// Terminal outcome of an interactive flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Installation completed
    Done,
    /// The flow stopped early by design (exit path or exit action)
    Exited,
    /// The user cancelled; a clean no-op, not an error
    Cancelled,
    /// An action or the installation failed
    Aborted,
}

impl FlowOutcome {
    /// Whether the outcome counts as success for the caller
    #[must_use]
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Aborted)
    }
}

/// Orchestrates interactive hook set installations
pub struct InteractiveInstaller<'a> {
    hook_name: &'a str,
    config: &'a HookSetConfig,
    hook_path: &'a Path,
    installer: &'a Installer,
    registry: &'a ActionRegistry,
    processor: &'a TemplateProcessor,
    console: &'a dyn Console,
    force: bool,
}

impl<'a> InteractiveInstaller<'a> {
    /// Create an interactive installer for one hook set
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        hook_name: &'a str,
        config: &'a HookSetConfig,
        hook_path: &'a Path,
        installer: &'a Installer,
        registry: &'a ActionRegistry,
        processor: &'a TemplateProcessor,
        console: &'a dyn Console,
        force: bool,
    ) -> Self {
        Self {
            hook_name,
            config,
            hook_path,
            installer,
            registry,
            processor,
            console,
            force,
        }
    }

    /// Execute the interactive installation flow
    ///
    /// Errors never escape: failures are reported through the console and
    /// mapped to [`FlowOutcome::Aborted`], cancellation to
    /// [`FlowOutcome::Cancelled`].
    pub fn run(&self) -> FlowOutcome {
        match self.run_flow() {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => {
                self.console.print("Installation cancelled by user");
                FlowOutcome::Cancelled
            }
            Err(e) => {
                error!(hook_set = %self.hook_name, error = %e, "Interactive installation failed");
                self.console.print(&format!("Installation failed: {e}"));
                FlowOutcome::Aborted
            }
        }
    }

    fn run_flow(&self) -> Result<FlowOutcome> {
        let interactive = self.config.interactive_install.as_ref().ok_or_else(|| {
            Error::Config(format!(
                "hook set '{}' declares no interactive installation",
                self.hook_name
            ))
        })?;

        if let Some(prompt) = &interactive.pre_install_prompt {
            self.console.print("");
            self.console.print(prompt);
            self.console.print("");
        }

        if interactive.paths.is_empty() {
            return Err(Error::Config("no installation paths configured".to_string()));
        }

        let labels: Vec<String> = interactive
            .paths
            .values()
            .map(|path| path.label.clone())
            .collect();
        let choice = self.console.choose("What do you want to do?", &labels)?;
        let (path_name, path_config) = interactive
            .paths
            .get_index(choice)
            .ok_or_else(|| Error::Config("selected path out of range".to_string()))?;

        let inputs = self.collect_parameters(path_name, path_config.path_type)?;

        if self.execute_actions(path_config, &inputs)? == ActionOutcome::ExitFlow {
            return Ok(FlowOutcome::Exited);
        }

        if path_config.path_type == PathType::Exit {
            return Ok(FlowOutcome::Exited);
        }

        self.run_standard_installation(&inputs)
    }

    /// Collect parameters according to the path type
    ///
    /// Full prompts for everything, Default prompts only for required
    /// inputs and substitutes declared defaults for the rest, Exit
    /// prompts for nothing. Pre-set values are never overwritten by a
    /// declared default.
    fn collect_parameters(
        &self,
        path_name: &str,
        path_type: PathType,
    ) -> Result<IndexMap<String, String>> {
        let mut inputs = IndexMap::new();

        if self.hook_name == "observability_viz" && path_name == "docker_deploy" {
            for (name, value) in DOCKER_DEPLOY_PRESETS {
                inputs.insert(name.to_string(), value.to_string());
            }
            self.console
                .print("Using pre-configured Docker container settings for the InfluxDB connection");
        }

        for (name, spec) in &self.config.inputs {
            let should_ask = match path_type {
                PathType::Full => true,
                PathType::Default => spec.required,
                PathType::Exit => false,
            };

            if should_ask {
                let value = self
                    .console
                    .prompt(&spec.prompt_text(name), spec.default.as_deref())?;
                inputs.insert(name.clone(), value);
            } else if !inputs.contains_key(name) {
                if let Some(default) = &spec.default {
                    inputs.insert(name.clone(), default.clone());
                }
            }
        }

        Ok(inputs)
    }

    /// Execute the path's actions strictly in declared order
    ///
    /// The first failing action aborts the flow; an exit action
    /// short-circuits it cleanly regardless of position.
    fn execute_actions(
        &self,
        path_config: &PathConfig,
        inputs: &IndexMap<String, String>,
    ) -> Result<ActionOutcome> {
        if path_config.actions.is_empty() {
            return Ok(ActionOutcome::Continue);
        }

        let context = ActionContext {
            hook_name: self.hook_name,
            hook_path: self.hook_path,
            target_dir: self.installer.target_dir(),
            inputs,
            processor: self.processor,
            console: self.console,
        };

        for spec in &path_config.actions {
            let action = self
                .registry
                .create(&spec.action_type, &spec.args)
                .ok_or_else(|| Error::UnknownAction {
                    action_type: spec.action_type.clone(),
                })??;

            if action.execute(&context)? == ActionOutcome::ExitFlow {
                return Ok(ActionOutcome::ExitFlow);
            }
        }

        Ok(ActionOutcome::Continue)
    }

    fn run_standard_installation(
        &self,
        inputs: &IndexMap<String, String>,
    ) -> Result<FlowOutcome> {
        if !self.force {
            self.console.print("");
            self.console.print("Installation Summary:");
            self.console.print(&format!("  Hook Set: {}", self.hook_name));
            self.console.print(&format!(
                "  Target: {}",
                self.installer.target_dir().display()
            ));
            for (name, value) in inputs {
                self.console.print(&format!("  {name}: {value}"));
            }

            if !self.console.confirm("Proceed with hook installation?")? {
                self.console.print("Installation cancelled.");
                return Ok(FlowOutcome::Cancelled);
            }
        }

        self.installer.install(self.hook_path, inputs, self.processor)?;
        self.console
            .print(&format!("Successfully installed {} hooks!", self.hook_name));
        Ok(FlowOutcome::Done)
    }
}
