//! Dashboard launcher - environment bootstrapper for the financial dashboard.
//!
//! The launcher checks that the Python modules the dashboard needs are
//! importable, installs the package list through pip when they are not,
//! and then runs the Streamlit dashboard in the foreground.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Launcher configuration, defaults and loading
//! - [`error`] - Error types and result aliases
//! - [`launcher`] - The probe, install and launch sequence
//! - [`requirements`] - Module probing, package specifiers and installation
//! - [`shell`] - Process execution
//! - [`ui`] - Console output
//!
//! # Example
//!
//! ```
//! use dashboard_launcher::config::LauncherConfig;
//! use dashboard_launcher::launcher::LaunchPlan;
//!
//! let config = LauncherConfig::default();
//! let plan = LaunchPlan::from_config(&config, std::path::Path::new("."), &[]);
//! assert!(plan.display_command().contains("streamlit run dashboard.py"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod launcher;
pub mod requirements;
pub mod shell;
pub mod ui;

pub use error::{LauncherError, Result};
