//! Configuration schema definitions for the launcher.
//!
//! This module contains the struct definitions that map to the
//! `.dashboard/launcher.yml` file format. Every field has a default, so an
//! absent or empty file reproduces the stock dashboard setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Columns the dashboard expects in an uploaded CSV file.
///
/// Data, Category, Subcategory, Type, Client, Value. The launcher never
/// reads CSV data; the list is shown to the user before launch.
pub const CSV_COLUMNS: &[&str] = &[
    "Data",
    "Categoria",
    "Subcategoria",
    "Tipo",
    "Cliente",
    "Valor",
];

/// Root configuration structure for launcher.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Application name (for display purposes)
    pub app_name: String,

    /// Python interpreter used for probing, installing and launching
    pub python: String,

    /// Modules to probe and packages to install
    pub requirements: RequirementsConfig,

    /// How the dashboard is started
    pub launch: LaunchConfig,

    /// Global settings
    pub settings: Settings,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            app_name: "Dashboard Financeiro Profissional".to_string(),
            python: default_python(),
            requirements: RequirementsConfig::default(),
            launch: LaunchConfig::default(),
            settings: Settings::default(),
        }
    }
}

/// The interpreter name that is conventionally on PATH for this platform.
pub fn default_python() -> String {
    if cfg!(target_os = "windows") {
        "python".to_string()
    } else {
        "python3".to_string()
    }
}

/// Required modules and the packages that provide them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequirementsConfig {
    /// Module names that must be importable (e.g. `PIL`, not `pillow`)
    pub modules: Vec<String>,

    /// pip requirement specifiers installed when any module is missing
    pub packages: Vec<String>,

    /// Optional modules installed silently when missing
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<ExtraModule>,
}

impl Default for RequirementsConfig {
    fn default() -> Self {
        Self {
            modules: ["streamlit", "pandas", "plotly", "fpdf", "PIL"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            packages: ["streamlit", "pandas", "plotly", "fpdf2", "pillow", "kaleido==0.2.1"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extras: vec![ExtraModule {
                module: "kaleido".to_string(),
                package: "kaleido==0.2.1".to_string(),
            }],
        }
    }
}

/// An optional module whose absence never blocks the launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraModule {
    /// Module name to probe
    pub module: String,

    /// Package specifier to install when the module is missing
    pub package: String,
}

/// Dashboard launch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchConfig {
    /// Module run with `python -m` (the dashboard server)
    pub runner: String,

    /// Dashboard entry file, relative to the project root
    pub entry: PathBuf,

    /// Extra arguments passed after the entry file
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Seconds to wait before starting the dashboard
    pub pause_secs: u64,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            runner: "streamlit".to_string(),
            entry: PathBuf::from("dashboard.py"),
            args: Vec::new(),
            pause_secs: 3,
        }
    }
}

/// Global settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Default output mode: verbose, normal, quiet, silent
    pub default_output: OutputMode,
}

/// Output verbosity as written in config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}
