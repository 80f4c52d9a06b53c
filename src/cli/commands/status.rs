//! Status command implementation.
//!
//! The `rack-awareness status` command shows the committed unit status,
//! the deferred-event queue and the last dispatched event.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::state::{DeferredEvent, EventRecord, StateStore};
use crate::ui::UserInterface;
use crate::unit::UnitStatus;

use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    state_dir: PathBuf,
    args: StatusArgs,
}

/// JSON shape of `status --json`.
#[derive(Debug, Serialize)]
struct StatusView<'a> {
    status: &'a UnitStatus,
    deferred: &'a [DeferredEvent],
    last_event: Option<&'a EventRecord>,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(state_dir: &Path, args: StatusArgs) -> Self {
        Self {
            state_dir: state_dir.to_path_buf(),
            args,
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let state = StateStore::load(&self.state_dir)?;

        if self.args.json {
            let view = StatusView {
                status: &state.status,
                deferred: &state.deferred,
                last_event: state.last_event(),
            };
            let json = serde_json::to_string_pretty(&view).map_err(anyhow::Error::from)?;
            // JSON goes out even in quiet mode.
            println!("{}", json);
            return Ok(CommandResult::success());
        }

        ui.show_status("Unit", &state.status);

        if state.deferred.is_empty() {
            ui.message("Deferred: none");
        } else {
            ui.message("Deferred:");
            for d in &state.deferred {
                ui.message(&format!(
                    "  {} (since {}, {} retries)",
                    d.event,
                    d.deferred_at.format("%Y-%m-%d %H:%M"),
                    d.attempts
                ));
            }
        }

        if let Some(last) = state.last_event() {
            ui.message(&format!(
                "Last event: {} ({:?}) at {}",
                last.event,
                last.result,
                last.timestamp.format("%Y-%m-%d %H:%M:%S")
            ));
        }

        Ok(CommandResult::success())
    }
}
