//! Config command implementation.
//!
//! The `dashboard-launcher config` command shows the resolved configuration.

use crate::cli::args::ConfigArgs;
use crate::config::{to_yaml, ConfigSource};
use crate::error::{LauncherError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ConfigLocation, CONFIG_ERROR_EXIT};

/// The config command implementation.
pub struct ConfigCommand {
    location: ConfigLocation,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(location: ConfigLocation, args: ConfigArgs) -> Self {
        Self { location, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(loaded) = self.location.load(ui)? else {
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT));
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(&loaded.config)
                .map_err(|e| LauncherError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        match &loaded.source {
            ConfigSource::File(path) => ui.message(&format!("# {}", path.display())),
            ConfigSource::Defaults => ui.message("# built-in defaults"),
        }
        ui.message("");
        ui.message(&to_yaml(&loaded.config)?);

        Ok(CommandResult::success())
    }
}
