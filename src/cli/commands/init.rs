//! Init command implementation.
//!
//! The `dashboard-launcher init` command writes the default configuration
//! to `.dashboard/launcher.yml` so it can be edited.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::{project_config_path, to_yaml, LauncherConfig, CSV_COLUMNS};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InitArgs {
        &self.args
    }

    /// Render the default configuration with a commented header.
    fn create_config(&self) -> Result<String> {
        let header = format!(
            "# Dashboard launcher configuration\n\
             #\n\
             # requirements.modules are imported to check the environment;\n\
             # requirements.packages are installed with pip when any is missing.\n\
             # The dashboard expects CSV uploads with columns:\n\
             #   {}\n\
             #\n\
             # settings.default_output: verbose | normal | quiet | silent\n\
             \n",
            CSV_COLUMNS.join(", ")
        );
        Ok(header + &to_yaml(&LauncherConfig::default())?)
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = project_config_path(&self.project_root);

        if path.exists() && !self.args.force {
            ui.error(&format!(
                "Configuration already exists at {}. Use --force to overwrite.",
                path.display()
            ));
            return Ok(CommandResult::failure(1));
        }

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, self.create_config()?)?;
        tracing::debug!("Wrote {}", path.display());

        ui.success(&format!("Created {}", path.display()));
        ui.show_hint("Run 'dashboard-launcher' to start the dashboard");
        Ok(CommandResult::success())
    }
}
