//! Python module detection and package installation.
//!
//! # Modules
//!
//! - [`package`] - pip requirement specifiers and module-name checks
//! - [`probe`] - Import probe and interpreter lookup
//! - [`installer`] - `pip install` invocation
//! - [`status`] - Probe and install outcome types

pub mod installer;
pub mod package;
pub mod probe;
pub mod status;

pub use installer::{describe_packages, install_command, run_install, InstallMode};
pub use package::{is_module_name, PackageSpec, VersionConstraint};
pub use probe::{resolve_interpreter, run_probe};
pub use status::{InstallOutcome, ModuleStatus, ProbeReport};
