//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default directory for persisted unit state.
pub const DEFAULT_STATE_DIR: &str = "/var/lib/rack-awareness";

/// Rack awareness - writes the broker rack identifier for the Kafka snap.
#[derive(Debug, Parser)]
#[command(name = "rack-awareness")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to unit config file (defaults to ./config.yaml if present)
    #[arg(short, long, global = true, env = "RACK_AWARENESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding persisted unit state
    #[arg(
        long,
        global = true,
        env = "RACK_AWARENESS_STATE_DIR",
        default_value = DEFAULT_STATE_DIR
    )]
    pub state_dir: PathBuf,

    /// Override a config option (repeatable), e.g. --set broker-rack=us-west
    #[arg(long = "set", global = true, value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

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
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Handle the install event: activate once the snap is present
    Install,

    /// Handle the config-changed event: write rack.properties while active
    ConfigChanged,

    /// Handle the update-status event: re-run deferred events only
    UpdateStatus,

    /// Show unit status and deferred events
    Status(StatusArgs),
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_event_subcommands() {
        let cli = Cli::parse_from(["rack-awareness", "config-changed"]);
        assert!(matches!(cli.command, Commands::ConfigChanged));

        let cli = Cli::parse_from(["rack-awareness", "install"]);
        assert!(matches!(cli.command, Commands::Install));

        let cli = Cli::parse_from(["rack-awareness", "update-status"]);
        assert!(matches!(cli.command, Commands::UpdateStatus));
    }

    #[test]
    fn parses_status_json() {
        let cli = Cli::parse_from(["rack-awareness", "status", "--json"]);
        match cli.command {
            Commands::Status(args) => assert!(args.json),
            _ => panic!("Expected Status command"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "rack-awareness",
            "config-changed",
            "--set",
            "broker-rack=us-west",
            "--state-dir",
            "/tmp/state",
            "--debug",
        ]);
        assert_eq!(cli.overrides, vec!["broker-rack=us-west"]);
        assert_eq!(cli.state_dir, PathBuf::from("/tmp/state"));
        assert!(cli.debug);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["rack-awareness"]).is_err());
    }
}
