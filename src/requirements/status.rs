//! Probe and install outcome types.
//!
//! A probe never fails with an error. An interpreter that cannot be run
//! produces a report where every module is missing, so the caller's
//! remediation path is the same as for a genuinely missing module.

use serde::Serialize;
use std::time::Duration;

/// Whether a single module could be imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    /// `import <module>` succeeded.
    Present,
    /// `import <module>` raised, or the probe could not run.
    Missing,
}

/// Result of probing a set of modules in one interpreter process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// Modules that were probed, in order.
    pub modules: Vec<String>,
    /// Subset of `modules` that could not be imported.
    pub missing: Vec<String>,
    /// Why the probe could not run at all (interpreter missing, crash).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_error: Option<String>,
}

impl ProbeReport {
    /// Report for a probe that ran and found `missing` absent.
    pub fn new(modules: &[String], missing: Vec<String>) -> Self {
        Self {
            modules: modules.to_vec(),
            missing,
            probe_error: None,
        }
    }

    /// Report for a probe that could not run; every module counts as missing.
    pub fn failed(modules: &[String], error: impl Into<String>) -> Self {
        Self {
            modules: modules.to_vec(),
            missing: modules.to_vec(),
            probe_error: Some(error.into()),
        }
    }

    /// The binary probe outcome: true only if every module imported.
    pub fn all_present(&self) -> bool {
        self.probe_error.is_none() && self.missing.is_empty()
    }

    /// Status of one module.
    pub fn status_of(&self, module: &str) -> ModuleStatus {
        if self.missing.iter().any(|m| m == module) {
            ModuleStatus::Missing
        } else {
            ModuleStatus::Present
        }
    }

    /// Per-module statuses in probe order.
    pub fn statuses(&self) -> Vec<(String, ModuleStatus)> {
        self.modules
            .iter()
            .map(|m| (m.clone(), self.status_of(m)))
            .collect()
    }
}

/// Result of running the package manager once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InstallOutcome {
    /// pip exited with status 0.
    Installed {
        #[serde(skip)]
        duration: Duration,
    },
    /// pip ran but exited non-zero (None if killed by signal).
    Failed { exit_code: Option<i32> },
    /// pip could not be started.
    SpawnFailed { message: String },
}

impl InstallOutcome {
    /// Whether pip reported success.
    pub fn is_success(&self) -> bool {
        matches!(self, InstallOutcome::Installed { .. })
    }

    /// One-line description for console output.
    pub fn describe(&self) -> String {
        match self {
            InstallOutcome::Installed { .. } => "installed".to_string(),
            InstallOutcome::Failed {
                exit_code: Some(code),
            } => format!("pip exited with code {}", code),
            InstallOutcome::Failed { exit_code: None } => "pip was terminated".to_string(),
            InstallOutcome::SpawnFailed { message } => format!("could not run pip: {}", message),
        }
    }
}
