//! Error types for launcher operations.
//!
//! This module defines [`LauncherError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Probe and install failures are outcomes, not errors: the launch
//!   always proceeds after remediation
//! - Use `LauncherError` for failures that stop a command
//! - Use `anyhow::Error` (via `LauncherError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for launcher operations.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// Configuration file not found at the requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A package specifier could not be parsed.
    #[error("Invalid package specifier: '{spec}'")]
    InvalidPackageSpec { spec: String },

    /// A process could not be spawned or waited on.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The dashboard process could not be started.
    #[error("Failed to launch '{command}': {message}")]
    LaunchFailed { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LauncherError {
    /// Whether this error comes from loading or validating configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LauncherError::ConfigNotFound { .. }
                | LauncherError::ConfigParseError { .. }
                | LauncherError::ConfigValidationError { .. }
        )
    }
}

/// Result type alias for launcher operations.
pub type Result<T> = std::result::Result<T, LauncherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = LauncherError::ConfigNotFound {
            path: PathBuf::from("/foo/launcher.yml"),
        };
        assert!(err.to_string().contains("/foo/launcher.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = LauncherError::ConfigParseError {
            path: PathBuf::from("/launcher.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/launcher.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn invalid_package_spec_displays_spec() {
        let err = LauncherError::InvalidPackageSpec {
            spec: "kaleido===".into(),
        };
        assert!(err.to_string().contains("kaleido==="));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = LauncherError::CommandFailed {
            command: "python3 -m pip install pandas".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("pip install pandas"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn launch_failed_displays_command_and_message() {
        let err = LauncherError::LaunchFailed {
            command: "python3 -m streamlit run dashboard.py".into(),
            message: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("streamlit run dashboard.py"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn config_errors_are_classified() {
        assert!(LauncherError::ConfigValidationError {
            message: "x".into()
        }
        .is_config_error());
        assert!(!LauncherError::LaunchFailed {
            command: "x".into(),
            message: "y".into()
        }
        .is_config_error());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: LauncherError = io_err.into();
        assert!(matches!(err, LauncherError::Io(_)));
    }
}
