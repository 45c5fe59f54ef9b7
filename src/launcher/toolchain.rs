//! The interpreter interactions behind the launch sequence.
//!
//! [`Toolchain`] is the seam between the sequence logic and real
//! processes: [`PythonToolchain`] spawns the interpreter, while tests swap
//! in a recording implementation.

use std::path::{Path, PathBuf};

use crate::error::{LauncherError, Result};
use crate::launcher::plan::LaunchPlan;
use crate::requirements::{
    run_install, run_probe, InstallMode, InstallOutcome, PackageSpec, ProbeReport,
};
use crate::shell::{execute_foreground, CommandOptions};

/// Probe, install and launch operations against one interpreter.
pub trait Toolchain {
    /// Check whether every module in `modules` can be imported.
    fn probe(&self, modules: &[String]) -> ProbeReport;

    /// Install `packages` once.
    fn install(&self, packages: &[PackageSpec], mode: InstallMode) -> InstallOutcome;

    /// Run the dashboard in the foreground until it exits.
    ///
    /// Returns its exit code, or `None` if it was terminated by a signal.
    fn launch(&self, plan: &LaunchPlan) -> Result<Option<i32>>;
}

/// [`Toolchain`] backed by a real Python interpreter.
#[derive(Debug, Clone)]
pub struct PythonToolchain {
    python: String,
    cwd: Option<PathBuf>,
}

impl PythonToolchain {
    /// Create a toolchain for the given interpreter name or path.
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            cwd: None,
        }
    }

    /// Probe from `dir`, the directory the dashboard runs in.
    pub fn with_cwd(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// The interpreter this toolchain runs.
    pub fn python(&self) -> &str {
        &self.python
    }
}

impl Toolchain for PythonToolchain {
    fn probe(&self, modules: &[String]) -> ProbeReport {
        run_probe(&self.python, modules, self.cwd.as_deref())
    }

    fn install(&self, packages: &[PackageSpec], mode: InstallMode) -> InstallOutcome {
        run_install(&self.python, packages, mode)
    }

    fn launch(&self, plan: &LaunchPlan) -> Result<Option<i32>> {
        let spec = plan.command();
        let options = CommandOptions {
            cwd: Some(plan.cwd.clone()),
            ..Default::default()
        };

        let status = execute_foreground(&spec, &options).map_err(|e| {
            let message = match e {
                LauncherError::Io(io) => io.to_string(),
                other => other.to_string(),
            };
            LauncherError::LaunchFailed {
                command: spec.to_string(),
                message,
            }
        })?;
        Ok(status.code())
    }
}
