//! Run command implementation.
//!
//! The `dashboard-launcher run` command (also the default when no
//! subcommand is given) checks the Python environment, installs packages
//! if needed, and starts the dashboard in the foreground.

use std::time::Duration;

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::launcher::{BootstrapOptions, Bootstrapper, PythonToolchain};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ConfigLocation, CONFIG_ERROR_EXIT};

/// Exit code reported when the dashboard was terminated by a signal.
pub const SIGNAL_EXIT: i32 = 1;

/// The run command implementation.
pub struct RunCommand {
    location: ConfigLocation,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(location: ConfigLocation, args: RunArgs) -> Self {
        Self { location, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    fn options(&self) -> BootstrapOptions {
        BootstrapOptions {
            skip_install: self.args.skip_install,
            force_install: self.args.force_install,
            no_pause: self.args.no_pause,
            pause: self.args.pause.map(Duration::from_secs),
            dry_run: self.args.dry_run,
            app_args: self.args.app_args.clone(),
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(loaded) = self.location.load(ui)? else {
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT));
        };
        tracing::debug!("Using configuration from {:?}", loaded.source);

        let toolchain =
            PythonToolchain::new(&loaded.config.python).with_cwd(&self.location.project_root);
        let bootstrapper = Bootstrapper::new(
            &loaded.config,
            &self.location.project_root,
            toolchain,
            self.options(),
        );

        let report = bootstrapper.run(ui)?;
        if !report.launched {
            return Ok(CommandResult::success());
        }

        let code = report.exit_code.unwrap_or(SIGNAL_EXIT);
        if code != 0 {
            tracing::debug!("Dashboard exited with code {}", code);
        }
        Ok(CommandResult::from_exit_code(code))
    }
}
