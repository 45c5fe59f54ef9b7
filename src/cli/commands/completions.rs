//! Shell completions generation.
//!
//! The `dashboard-launcher completions` command generates shell completion
//! scripts.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::UserInterface;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

const BIN_NAME: &str = "dashboard-launcher";

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// Write the completion script for the selected shell.
    pub fn generate(&self, out: &mut dyn std::io::Write) {
        let mut cmd = Cli::command();
        clap_complete::generate(self.args.shell, &mut cmd, BIN_NAME, out);
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        self.generate(&mut std::io::stdout());
        Ok(CommandResult::success())
    }
}
