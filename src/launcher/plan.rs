//! The dashboard launch command.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::LauncherConfig;
use crate::shell::CommandSpec;

/// Everything needed to start the dashboard: `python -m <runner> run <entry>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    /// Interpreter that runs the dashboard server
    pub python: String,
    /// Server module run with `-m`
    pub runner: String,
    /// Entry file as configured (relative paths resolve against `cwd`)
    pub entry: PathBuf,
    /// Configured arguments followed by command-line arguments
    pub args: Vec<String>,
    /// Working directory for the dashboard process
    pub cwd: PathBuf,
    /// Wait before starting
    pub pause: Duration,
}

impl LaunchPlan {
    /// Build the plan from configuration.
    ///
    /// `extra_args` come from the command line and follow the configured
    /// `launch.args`.
    pub fn from_config(config: &LauncherConfig, project_root: &Path, extra_args: &[String]) -> Self {
        let mut args = config.launch.args.clone();
        args.extend(extra_args.iter().cloned());

        Self {
            python: config.python.clone(),
            runner: config.launch.runner.clone(),
            entry: config.launch.entry.clone(),
            args,
            cwd: project_root.to_path_buf(),
            pause: Duration::from_secs(config.launch.pause_secs),
        }
    }

    /// Drop the pause before launch.
    pub fn without_pause(mut self) -> Self {
        self.pause = Duration::ZERO;
        self
    }

    /// The process to spawn.
    pub fn command(&self) -> CommandSpec {
        CommandSpec::new(&self.python)
            .args(["-m", self.runner.as_str(), "run"])
            .arg(self.entry.to_string_lossy())
            .args(self.args.iter().cloned())
    }

    /// The command as shown to the user.
    pub fn display_command(&self) -> String {
        self.command().to_string()
    }

    /// Absolute location of the entry file.
    pub fn entry_path(&self) -> PathBuf {
        self.cwd.join(&self.entry)
    }

    /// Whether the entry file exists.
    pub fn entry_exists(&self) -> bool {
        self.entry_path().is_file()
    }
}
