//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use dashboard_launcher::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Starting dashboard");
//! ui.success("Done!");
//!
//! assert!(ui.has_message("Starting"));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::sync::{Arc, Mutex};

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    hints: Vec<String>,
    spinners: Vec<String>,
    spinner_results: Arc<Mutex<Vec<(SpinnerStatus, String)>>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured hints.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Final status and message of every finished spinner, in finish order.
    pub fn spinner_results(&self) -> Vec<(SpinnerStatus, String)> {
        self.spinner_results
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
            || self
                .spinner_results()
                .iter()
                .any(|(s, m)| *s == SpinnerStatus::Success && m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
            || self
                .spinner_results()
                .iter()
                .any(|(s, m)| *s == SpinnerStatus::Error && m.contains(msg))
    }

    /// Check if a specific hint was shown.
    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            results: Arc::clone(&self.spinner_results),
            ..Default::default()
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that captures finish messages.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
    results: Arc<Mutex<Vec<(SpinnerStatus, String)>>>,
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all messages set during spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// Get the final status.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }

    fn finish(&mut self, status: SpinnerStatus, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(status);
        if let Ok(mut results) = self.results.lock() {
            results.push((status, msg.to_string()));
        }
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Success, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Error, msg);
    }
}
