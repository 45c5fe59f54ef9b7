//! Plain UI for CI, pipes, and redirected output.

use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// No colors and no animated spinners: a spinner prints its start line and
/// its final line, which keeps log files readable.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_hints() {
            println!("  {}", hint);
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let visible = self.mode.shows_spinners();
        if visible {
            println!("{}", message);
        }
        Box::new(LineSpinner { visible })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that prints only its final status line.
struct LineSpinner {
    visible: bool,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.visible {
            println!("✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        if self.visible {
            eprintln!("✗ {}", msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_is_never_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn spinner_works_in_silent_mode() {
        let mut ui = NonInteractiveUI::new(OutputMode::Silent);
        let mut spinner = ui.start_spinner("Probing");
        spinner.finish_error("failed");
    }
}
