//! Lifecycle event commands.
//!
//! `rack-awareness install`, `config-changed` and `update-status` each run
//! one dispatch against the real snap client and filesystem.

use std::path::{Path, PathBuf};

use crate::config::ConfigSource;
use crate::error::Result;
use crate::presence::SnapPresence;
use crate::runner::{DispatchReport, Dispatcher};
use crate::ui::UserInterface;
use crate::unit::EventKind;
use crate::writer::FsWriter;

use super::dispatcher::{Command, CommandResult};

/// Dispatches one lifecycle event.
pub struct EventCommand {
    event: EventKind,
    state_dir: PathBuf,
    source: ConfigSource,
}

impl EventCommand {
    /// Create a new event command.
    pub fn new(event: EventKind, state_dir: &Path, source: ConfigSource) -> Self {
        Self {
            event,
            state_dir: state_dir.to_path_buf(),
            source,
        }
    }
}

impl Command for EventCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // The oracle is built from settings as they are now; options are
        // re-read per event inside the dispatch.
        let settings = self.source.load()?.settings;
        let oracle = SnapPresence::with_command(&settings.package, &settings.snap_command);

        let dispatcher = Dispatcher::new(&self.state_dir, self.source.clone());
        let report = dispatcher.dispatch(self.event, oracle, FsWriter::new())?;

        show_report(ui, self.event, &report);
        Ok(CommandResult::success())
    }
}

fn show_report(ui: &mut dyn UserInterface, event: EventKind, report: &DispatchReport) {
    if report.handled.contains(&event) {
        ui.success(&format!("{} handled", event));
    }
    if report.has_deferred() {
        let names: Vec<&str> = report.deferred.iter().map(|e| e.as_str()).collect();
        ui.warning(&format!("Deferred until next dispatch: {}", names.join(", ")));
    }
    ui.show_status("Unit", &report.status);
}
