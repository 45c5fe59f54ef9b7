//! pip requirement specifiers and Python module names.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{LauncherError, Result};

/// Regex for a single pip requirement: `name[extras] op version`.
static SPEC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*(\[[A-Za-z0-9._,\s-]+\])?\s*(?:(==|>=|<=|~=|!=|>|<)\s*([A-Za-z0-9.*+!_-]+))?\s*$",
    )
    .expect("SPEC_REGEX must compile")
});

/// Regex for an importable dotted module path.
static MODULE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("MODULE_REGEX must compile")
});

/// Whether `name` can be passed to `import` as-is.
pub fn is_module_name(name: &str) -> bool {
    MODULE_REGEX.is_match(name)
}

/// A version constraint attached to a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    /// Comparison operator (`==`, `>=`, ...)
    pub op: String,
    /// Version string
    pub version: String,
}

/// A parsed pip requirement specifier such as `kaleido==0.2.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Distribution name
    pub name: String,
    /// Extras in brackets, without the brackets
    pub extras: Option<String>,
    /// Optional version constraint
    pub constraint: Option<VersionConstraint>,
}

impl PackageSpec {
    /// Parse a requirement specifier.
    pub fn parse(spec: &str) -> Result<Self> {
        let caps = SPEC_REGEX
            .captures(spec)
            .ok_or_else(|| LauncherError::InvalidPackageSpec {
                spec: spec.to_string(),
            })?;

        let name = caps[1].to_string();
        let extras = caps.get(2).map(|m| {
            m.as_str()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .trim()
                .to_string()
        });
        let constraint = match (caps.get(3), caps.get(4)) {
            (Some(op), Some(version)) => Some(VersionConstraint {
                op: op.as_str().to_string(),
                version: version.as_str().to_string(),
            }),
            _ => None,
        };

        Ok(Self {
            name,
            extras,
            constraint,
        })
    }

    /// Parse a list of specifiers, failing on the first invalid one.
    pub fn parse_all<S: AsRef<str>>(specs: &[S]) -> Result<Vec<Self>> {
        specs.iter().map(|s| Self::parse(s.as_ref())).collect()
    }

    /// Whether the package is pinned to an exact version.
    pub fn is_pinned(&self) -> bool {
        self.constraint.as_ref().is_some_and(|c| c.op == "==")
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(extras) = &self.extras {
            write!(f, "[{}]", extras)?;
        }
        if let Some(c) = &self.constraint {
            write!(f, "{}{}", c.op, c.version)?;
        }
        Ok(())
    }
}
