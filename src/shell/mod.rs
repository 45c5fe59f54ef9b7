//! Process execution and platform helpers.

pub mod command;
pub mod platform;

pub use command::{
    execute, execute_foreground, execute_quiet, CommandOptions, CommandResult, CommandSpec,
};
pub use platform::{executable_names, is_ci};
