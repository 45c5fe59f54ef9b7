//! Environment bootstrap and dashboard launch.
//!
//! - [`bootstrap`] - The probe, install, launch sequence
//! - [`plan`] - The dashboard command and its working directory
//! - [`toolchain`] - The interpreter seam and its production implementation

pub mod bootstrap;
pub mod plan;
pub mod toolchain;

pub use bootstrap::{BootstrapOptions, BootstrapReport, Bootstrapper};
pub use plan::LaunchPlan;
pub use toolchain::{PythonToolchain, Toolchain};
