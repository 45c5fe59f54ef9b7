//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Prepare the Python environment and start the financial dashboard.
#[derive(Debug, Parser)]
#[command(name = "dashboard-launcher")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .dashboard/launcher.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check modules, install if needed, and start the dashboard (default)
    Run(RunArgs),

    /// Check which required modules can be imported
    Check(CheckArgs),

    /// Install the configured packages now
    Install(InstallArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Write the default configuration for a project
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Preview commands without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Never install packages, even if modules are missing
    #[arg(long, conflicts_with = "force_install")]
    pub skip_install: bool,

    /// Install packages even if every module is present
    #[arg(long)]
    pub force_install: bool,

    /// Start the dashboard without waiting
    #[arg(long)]
    pub no_pause: bool,

    /// Seconds to wait before starting the dashboard
    #[arg(long, value_name = "SECS", conflicts_with = "no_pause")]
    pub pause: Option<u64>,

    /// Arguments passed through to the dashboard server
    #[arg(last = true, value_name = "APP_ARGS")]
    pub app_args: Vec<String>,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Print the install command without running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["dashboard-launcher"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn run_collects_trailing_app_args() {
        let cli = Cli::try_parse_from([
            "dashboard-launcher",
            "run",
            "--no-pause",
            "--",
            "--server.port",
            "8600",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Run(args)) => {
                assert!(args.no_pause);
                assert_eq!(args.app_args, vec!["--server.port", "8600"]);
            }
            other => panic!("Expected run, got {other:?}"),
        }
    }

    #[test]
    fn skip_and_force_install_conflict() {
        let result = Cli::try_parse_from([
            "dashboard-launcher",
            "run",
            "--skip-install",
            "--force-install",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["dashboard-launcher", "check", "--json", "-p", "/tmp/x", "-q"])
                .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Some(Commands::Check(CheckArgs { json: true }))));
    }
}
