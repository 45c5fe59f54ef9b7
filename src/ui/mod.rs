//! Console user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminals (colors, spinners)
//! - [`NonInteractiveUI`] for CI, pipes, and redirected output
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use dashboard_launcher::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Dashboard");
//! ui.success("All modules present");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, LauncherTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode (config defaults apply after the UI exists).
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a dim, secondary hint.
    fn show_hint(&mut self, hint: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Remove the spinner without a final line.
    ///
    /// Used before handing the console to a child process.
    fn clear(&mut self) {}
}
