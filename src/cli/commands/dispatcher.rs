//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::{load_config, LoadedConfig};
use crate::error::Result;
use crate::ui::{OutputMode, UserInterface};

/// Exit code for configuration problems.
pub const CONFIG_ERROR_EXIT: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Result carrying a child process's exit code.
    pub fn from_exit_code(exit_code: i32) -> Self {
        Self {
            success: exit_code == 0,
            exit_code,
        }
    }
}

/// Where commands find their configuration.
#[derive(Debug, Clone)]
pub struct ConfigLocation {
    /// Project root (the dashboard's working directory).
    pub project_root: PathBuf,
    /// Explicit `--config` file, if given.
    pub config_override: Option<PathBuf>,
}

impl ConfigLocation {
    /// Create a location with no override.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: None,
        }
    }

    /// Load the configuration for a command.
    ///
    /// Configuration errors are reported through `ui` and yield `None`; the
    /// caller then exits with [`CONFIG_ERROR_EXIT`]. The config's
    /// `default_output` applies when no output flag was given.
    pub fn load(&self, ui: &mut dyn UserInterface) -> Result<Option<LoadedConfig>> {
        match load_config(&self.project_root, self.config_override.as_deref()) {
            Ok(loaded) => {
                if ui.output_mode() == OutputMode::Normal {
                    ui.set_output_mode(loaded.config.settings.default_output.into());
                }
                Ok(Some(loaded))
            }
            Err(e) if e.is_config_error() => {
                ui.error(&e.to_string());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    location: ConfigLocation,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            location: ConfigLocation {
                project_root,
                config_override: None,
            },
        }
    }

    /// Use an explicit config file instead of project discovery.
    pub fn with_config_override(mut self, path: Option<PathBuf>) -> Self {
        self.location.config_override = path;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.location.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let location = self.location.clone();
        match &cli.command {
            Some(Commands::Run(args)) => {
                super::run::RunCommand::new(location, args.clone()).execute(ui)
            }
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(location, args.clone()).execute(ui)
            }
            Some(Commands::Install(args)) => {
                super::install::InstallCommand::new(location, args.clone()).execute(ui)
            }
            Some(Commands::Config(args)) => {
                super::config::ConfigCommand::new(location, args.clone()).execute(ui)
            }
            Some(Commands::Init(args)) => {
                super::init::InitCommand::new(self.project_root(), args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => {
                // Default to run command with default args
                super::run::RunCommand::new(location, RunArgs::default()).execute(ui)
            }
        }
    }
}
