//! Lifecycle events and handler outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle signals the unit reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// The unit was deployed.
    Install,
    /// Unit configuration may have changed.
    ConfigChanged,
    /// Periodic tick; only gives deferred events a chance to run.
    UpdateStatus,
}

impl EventKind {
    /// Event name as used on the command line and in persisted state.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Install => "install",
            EventKind::ConfigChanged => "config-changed",
            EventKind::UpdateStatus => "update-status",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a handler asks the dispatch loop to do with the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event is done.
    Handled,
    /// Retry the same event at the next dispatch opportunity.
    Deferred,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_match_serde_names() {
        for kind in [
            EventKind::Install,
            EventKind::ConfigChanged,
            EventKind::UpdateStatus,
        ] {
            let yaml = serde_yaml::to_string(&kind).unwrap();
            assert_eq!(yaml.trim(), kind.as_str());
        }
    }

    #[test]
    fn display_uses_event_name() {
        assert_eq!(EventKind::UpdateStatus.to_string(), "update-status");
    }

}
