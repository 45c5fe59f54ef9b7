//! Check command implementation.
//!
//! The `dashboard-launcher check` command probes the required modules and
//! optional extras without installing anything.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::config::LauncherConfig;
use crate::error::{LauncherError, Result};
use crate::launcher::{PythonToolchain, Toolchain};
use crate::requirements::{resolve_interpreter, ModuleStatus, ProbeReport};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult, ConfigLocation, CONFIG_ERROR_EXIT};

/// Machine-readable `check --json` output.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub python: String,
    pub interpreter: Option<PathBuf>,
    pub all_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_error: Option<String>,
    pub modules: Vec<ModuleEntry>,
    pub extras: Vec<ModuleEntry>,
}

/// One probed module.
#[derive(Debug, Serialize)]
pub struct ModuleEntry {
    pub module: String,
    pub status: ModuleStatus,
}

impl CheckReport {
    /// Combine the required and optional probe results.
    pub fn new(
        config: &LauncherConfig,
        interpreter: Option<PathBuf>,
        required: &ProbeReport,
        extras: &ProbeReport,
    ) -> Self {
        let entries = |report: &ProbeReport| -> Vec<ModuleEntry> {
            report
                .statuses()
                .into_iter()
                .map(|(module, status)| ModuleEntry { module, status })
                .collect()
        };

        Self {
            python: config.python.clone(),
            interpreter,
            all_present: required.all_present(),
            probe_error: required.probe_error.clone(),
            modules: entries(required),
            extras: entries(extras),
        }
    }
}

/// The check command implementation.
pub struct CheckCommand {
    location: ConfigLocation,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(location: ConfigLocation, args: CheckArgs) -> Self {
        Self { location, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn render_table(&self, report: &CheckReport, ui: &mut dyn UserInterface) {
        let mut table = Table::new(&["Module", "Kind", "Status"]);
        for (kind, entries) in [("required", &report.modules), ("optional", &report.extras)] {
            for entry in entries {
                let status = match entry.status {
                    ModuleStatus::Present => "present",
                    ModuleStatus::Missing => "missing",
                };
                table.add_row(&[entry.module.as_str(), kind, status]);
            }
        }
        ui.message(&table.render());
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(loaded) = self.location.load(ui)? else {
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT));
        };
        let config = &loaded.config;

        let toolchain = PythonToolchain::new(&config.python).with_cwd(&self.location.project_root);
        let interpreter = resolve_interpreter(&config.python);

        let required = if self.args.json {
            toolchain.probe(&config.requirements.modules)
        } else {
            let mut spinner = ui.start_spinner("Checking Python modules");
            let report = toolchain.probe(&config.requirements.modules);
            spinner.clear();
            report
        };

        let extra_modules: Vec<String> = config
            .requirements
            .extras
            .iter()
            .map(|e| e.module.clone())
            .collect();
        let extras = if extra_modules.is_empty() {
            ProbeReport::new(&[], Vec::new())
        } else {
            toolchain.probe(&extra_modules)
        };

        let report = CheckReport::new(config, interpreter, &required, &extras);

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| LauncherError::Other(e.into()))?;
            ui.message(&json);
        } else {
            ui.show_header(&format!("{} - Environment", config.app_name));
            match &report.interpreter {
                Some(path) => ui.message(&format!("Interpreter: {}", path.display())),
                None => ui.warning(&format!("Interpreter '{}' not found on PATH", config.python)),
            }
            ui.message("");
            self.render_table(&report, ui);
            ui.message("");

            if let Some(error) = &report.probe_error {
                ui.error(&format!("Could not check modules: {}", error));
            } else if report.all_present {
                ui.success("All required modules are available");
            } else {
                ui.warning(&format!(
                    "Missing modules: {}",
                    required.missing.join(", ")
                ));
                ui.show_hint("Run 'dashboard-launcher install' to install the configured packages");
            }
        }

        if report.all_present {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
