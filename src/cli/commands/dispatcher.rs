//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::config::ConfigSource;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::unit::EventKind;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] carrying the exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher resolving relative paths against `working_dir`.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Install => self.dispatch_event(cli, EventKind::Install, ui),
            Commands::ConfigChanged => self.dispatch_event(cli, EventKind::ConfigChanged, ui),
            Commands::UpdateStatus => self.dispatch_event(cli, EventKind::UpdateStatus, ui),
            Commands::Status(args) => {
                let cmd = super::status::StatusCommand::new(&cli.state_dir, args.clone());
                cmd.execute(ui)
            }
        }
    }

    fn dispatch_event(
        &self,
        cli: &Cli,
        event: EventKind,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let source = ConfigSource::discover(cli.config.as_deref(), &self.working_dir)
            .with_overrides(&cli.overrides)?;
        let cmd = super::event::EventCommand::new(event, &cli.state_dir, source);
        cmd.execute(ui)
    }
}
