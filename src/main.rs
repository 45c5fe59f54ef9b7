//! Dashboard launcher CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use dashboard_launcher::cli::{Cli, CommandDispatcher};
use dashboard_launcher::shell::is_ci;
use dashboard_launcher::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("dashboard_launcher=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("dashboard_launcher=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Launcher starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    // Process-local; pip and the dashboard keep their own color settings.
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let project_root = cli
        .project
        .as_ref()
        .cloned()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let mut ui = create_ui(!is_ci(), output_mode);

    let dispatcher =
        CommandDispatcher::new(project_root).with_config_override(cli.config.clone());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => exit_code(result.exit_code),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
