//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Interpreter, runner and entry must be non-empty
//! - Module names must be dotted Python identifiers
//! - Package lists must parse as pip requirement specifiers

use crate::config::schema::LauncherConfig;
use crate::error::{LauncherError, Result};
use crate::requirements::package::{is_module_name, PackageSpec};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &LauncherConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_launch(config));
    errors.extend(validate_requirements(config));

    errors
}

fn validate_launch(config: &LauncherConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.python.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-python",
            "'python' must name an interpreter".to_string(),
        ));
    }
    if !is_module_name(&config.launch.runner) {
        errors.push(ValidationError::new(
            "invalid-runner",
            format!(
                "'launch.runner' must be a module name, got '{}'",
                config.launch.runner
            ),
        ));
    }
    if config.launch.entry.as_os_str().is_empty() {
        errors.push(ValidationError::new(
            "empty-entry",
            "'launch.entry' must name the dashboard file".to_string(),
        ));
    }

    errors
}

fn validate_requirements(config: &LauncherConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let reqs = &config.requirements;

    if reqs.modules.is_empty() {
        errors.push(ValidationError::new(
            "no-modules",
            "'requirements.modules' must list at least one module".to_string(),
        ));
    }
    for module in &reqs.modules {
        if !is_module_name(module) {
            errors.push(ValidationError::new(
                "invalid-module",
                format!("'{}' is not a valid module name", module),
            ));
        }
    }

    if reqs.packages.is_empty() {
        errors.push(ValidationError::new(
            "no-packages",
            "'requirements.packages' must list at least one package".to_string(),
        ));
    }
    for package in &reqs.packages {
        if PackageSpec::parse(package).is_err() {
            errors.push(ValidationError::new(
                "invalid-package",
                format!("'{}' is not a valid package specifier", package),
            ));
        }
    }

    for extra in &reqs.extras {
        if !is_module_name(&extra.module) {
            errors.push(ValidationError::new(
                "invalid-extra",
                format!("extra module '{}' is not a valid module name", extra.module),
            ));
        }
        if PackageSpec::parse(&extra.package).is_err() {
            errors.push(ValidationError::new(
                "invalid-extra",
                format!(
                    "extra package '{}' is not a valid package specifier",
                    extra.package
                ),
            ));
        }
    }

    errors
}

/// Validate configuration, returning the first error.
pub fn validate(config: &LauncherConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(LauncherError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ExtraModule;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&LauncherConfig::default()).is_empty());
    }

    #[test]
    fn rejects_empty_python() {
        let config = LauncherConfig {
            python: "  ".to_string(),
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "empty-python"));
    }

    #[test]
    fn rejects_runner_with_spaces() {
        let mut config = LauncherConfig::default();
        config.launch.runner = "streamlit run".to_string();
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "invalid-runner"));
    }

    #[test]
    fn rejects_package_name_as_module() {
        let mut config = LauncherConfig::default();
        config.requirements.modules.push("scikit-learn".to_string());
        let errors = validate_config(&config);
        assert!(errors
            .iter()
            .any(|e| e.rule == "invalid-module" && e.message.contains("scikit-learn")));
    }

    #[test]
    fn rejects_empty_lists() {
        let mut config = LauncherConfig::default();
        config.requirements.modules.clear();
        config.requirements.packages.clear();
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "no-modules"));
        assert!(errors.iter().any(|e| e.rule == "no-packages"));
    }

    #[test]
    fn rejects_bad_extra() {
        let mut config = LauncherConfig::default();
        config.requirements.extras.push(ExtraModule {
            module: "kaleido".to_string(),
            package: "==0.2".to_string(),
        });
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "invalid-extra"));
    }

    #[test]
    fn validate_joins_messages() {
        let mut config = LauncherConfig::default();
        config.python = String::new();
        config.requirements.modules = vec!["1bad".to_string()];

        let err = validate(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("interpreter"));
        assert!(msg.contains("1bad"));
    }
}
