//! Configuration file discovery and loading.
//!
//! Resolution order:
//! 1. An explicit `--config` path (must exist)
//! 2. The project config at `.dashboard/launcher.yml`
//! 3. Built-in defaults

use crate::config::schema::LauncherConfig;
use crate::config::validator::validate;
use crate::error::{LauncherError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding launcher configuration, relative to the project root.
pub const CONFIG_DIR: &str = ".dashboard";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "launcher.yml";

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from a file on disk.
    File(PathBuf),
    /// No file was found; built-in defaults apply.
    Defaults,
}

/// A validated configuration and its origin.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: LauncherConfig,
    pub source: ConfigSource,
}

/// Path of the project config file for a project root.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load a single config file and parse it into LauncherConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<LauncherConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LauncherError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LauncherError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into LauncherConfig.
///
/// An empty document (or one holding only comments) yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<LauncherConfig> {
    let parse_error = |e: serde_yaml::Error| LauncherError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    };

    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
    if value.is_null() {
        return Ok(LauncherConfig::default());
    }
    serde_yaml::from_value(value).map_err(parse_error)
}

/// Load and validate the configuration for a project.
///
/// If `config_override` is provided, only that file is used and it must
/// exist. Otherwise the project config is used when present, falling back
/// to the built-in defaults.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<LoadedConfig> {
    let (config, source) = if let Some(path) = config_override {
        (load_config_file(path)?, ConfigSource::File(path.to_path_buf()))
    } else {
        let path = project_config_path(project_root);
        if path.is_file() {
            (load_config_file(&path)?, ConfigSource::File(path))
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            (LauncherConfig::default(), ConfigSource::Defaults)
        }
    };

    validate(&config)?;
    Ok(LoadedConfig { config, source })
}

/// Render a configuration as YAML.
pub fn to_yaml(config: &LauncherConfig) -> Result<String> {
    serde_yaml::to_string(config).map_err(|e| LauncherError::Other(e.into()))
}
