//! Package installation through `python -m pip install`.
//!
//! Installs run once, with no retry and no check of the result beyond
//! reporting it. The caller decides what a failure means; for the launch
//! sequence it only produces a warning.

use std::time::Instant;

use crate::requirements::package::PackageSpec;
use crate::requirements::status::InstallOutcome;
use crate::shell::{execute, CommandOptions, CommandSpec};

/// How pip output is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    /// pip writes straight to the console.
    Visible,
    /// `--quiet`, with stdout and stderr captured and discarded.
    Silent,
}

/// Build the install invocation for `packages`.
pub fn install_command(python: &str, packages: &[PackageSpec], mode: InstallMode) -> CommandSpec {
    let mut spec = CommandSpec::new(python).args(["-m", "pip", "install"]);
    if mode == InstallMode::Silent {
        spec = spec.arg("--quiet");
    }
    spec.args(packages.iter().map(|p| p.to_string()))
}

/// Run pip once and report the outcome.
pub fn run_install(python: &str, packages: &[PackageSpec], mode: InstallMode) -> InstallOutcome {
    let spec = install_command(python, packages, mode);
    let options = CommandOptions {
        capture_stdout: mode == InstallMode::Silent,
        capture_stderr: mode == InstallMode::Silent,
        ..Default::default()
    };

    let start = Instant::now();
    match execute(&spec, &options) {
        Ok(result) if result.success => InstallOutcome::Installed {
            duration: start.elapsed(),
        },
        Ok(result) => {
            tracing::warn!("'{}' exited with {:?}", spec, result.exit_code);
            InstallOutcome::Failed {
                exit_code: result.exit_code,
            }
        }
        Err(e) => {
            tracing::warn!("{}", e);
            InstallOutcome::SpawnFailed {
                message: format!("could not run '{}'", python),
            }
        }
    }
}

/// Summarize a package list for display, e.g. `pandas, kaleido (pinned 0.2.1)`.
pub fn describe_packages(packages: &[PackageSpec]) -> String {
    packages
        .iter()
        .map(|p| match &p.constraint {
            Some(c) if p.is_pinned() => format!("{} (pinned {})", p.name, c.version),
            Some(c) => format!("{} ({}{})", p.name, c.op, c.version),
            None => p.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
