//! Launcher configuration: schema, loading, and validation.
//!
//! - Schema definitions and defaults in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use dashboard_launcher::config::{load_config, ConfigSource};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::create_dir_all(temp.path().join(".dashboard")).unwrap();
//! fs::write(temp.path().join(".dashboard/launcher.yml"), "python: python3.12").unwrap();
//!
//! let loaded = load_config(temp.path(), None).unwrap();
//! assert_eq!(loaded.config.python, "python3.12");
//! assert!(matches!(loaded.source, ConfigSource::File(_)));
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    load_config, load_config_file, parse_config, project_config_path, to_yaml, ConfigSource,
    LoadedConfig, CONFIG_DIR, CONFIG_FILE,
};
pub use schema::{
    default_python, ExtraModule, LaunchConfig, LauncherConfig, OutputMode, RequirementsConfig,
    Settings, CSV_COLUMNS,
};
pub use validator::{validate, validate_config, ValidationError};
