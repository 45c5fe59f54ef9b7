//! Install command implementation.
//!
//! The `dashboard-launcher install` command runs the package install step
//! unconditionally, without probing first.

use crate::cli::args::InstallArgs;
use crate::error::Result;
use crate::launcher::{PythonToolchain, Toolchain};
use crate::requirements::{describe_packages, install_command, InstallMode, PackageSpec};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ConfigLocation, CONFIG_ERROR_EXIT};

/// The install command implementation.
pub struct InstallCommand {
    location: ConfigLocation,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(location: ConfigLocation, args: InstallArgs) -> Self {
        Self { location, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InstallArgs {
        &self.args
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(loaded) = self.location.load(ui)? else {
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT));
        };
        let config = &loaded.config;
        let packages = PackageSpec::parse_all(&config.requirements.packages)?;

        if self.args.dry_run {
            let spec = install_command(&config.python, &packages, InstallMode::Visible);
            ui.message(&format!("Would run: {}", spec));
            return Ok(CommandResult::success());
        }

        ui.message(&format!("Installing packages: {}", describe_packages(&packages)));
        let outcome = PythonToolchain::new(&config.python).install(&packages, InstallMode::Visible);

        if outcome.is_success() {
            ui.success("Packages installed");
            Ok(CommandResult::success())
        } else {
            ui.error(&format!("Package installation failed: {}", outcome.describe()));
            Ok(CommandResult::failure(1))
        }
    }
}
