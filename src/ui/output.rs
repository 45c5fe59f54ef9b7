//! Output verbosity mode.

use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including debug hints.
    Verbose,
    /// Show progress and status.
    #[default]
    Normal,
    /// Show minimal output (spinners + final status).
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl From<crate::config::OutputMode> for OutputMode {
    fn from(config_mode: crate::config::OutputMode) -> Self {
        match config_mode {
            crate::config::OutputMode::Verbose => Self::Verbose,
            crate::config::OutputMode::Normal => Self::Normal,
            crate::config::OutputMode::Quiet => Self::Quiet,
            crate::config::OutputMode::Silent => Self::Silent,
        }
    }
}

impl OutputMode {
    /// Check if this mode shows hints.
    pub fn shows_hints(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal | Self::Quiet)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
