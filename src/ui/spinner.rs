//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::LauncherTheme;
use super::SpinnerHandle;

/// A progress spinner for the probe and install steps.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: LauncherTheme,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str, theme: LauncherTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar, theme }
    }

    /// Create a spinner that doesn't show (for silent mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: LauncherTheme::plain(),
        }
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }

    fn clear(&mut self) {
        self.bar.finish_and_clear();
    }
}
