//! Persistent unit state.
//!
//! Each CLI invocation is one dispatch; everything that has to survive
//! between dispatches (unit status, deferred events, recent history) lives
//! in a single YAML file under the state directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::history::{DeferredEvent, EventRecord};
use crate::error::{RackError, Result};
use crate::unit::{EventKind, UnitStatus};

/// Persistent state for the unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateStore {
    /// Schema version for migration.
    pub version: u32,

    /// Last committed unit status.
    #[serde(default)]
    pub status: UnitStatus,

    /// Last dispatch timestamp.
    pub last_dispatch: Option<DateTime<Utc>>,

    /// Events waiting to be re-emitted, oldest first.
    #[serde(default)]
    pub deferred: Vec<DeferredEvent>,

    /// Event history (most recent first).
    #[serde(default)]
    pub history: Vec<EventRecord>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    /// Current schema version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Default number of history records to keep.
    pub const DEFAULT_HISTORY_RETENTION: usize = 50;

    /// File name inside the state directory.
    pub const FILE_NAME: &'static str = "state.yml";

    /// State of a unit that has never been dispatched.
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            status: UnitStatus::initial(),
            last_dispatch: None,
            deferred: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Get the state file path.
    pub fn state_file(state_dir: &Path) -> PathBuf {
        state_dir.join(Self::FILE_NAME)
    }

    /// Load state from disk, or a fresh state if none was saved yet.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = Self::state_file(state_dir);

        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&path)?;
        let state: Self = serde_yaml::from_str(&content).map_err(|e| RackError::StateError {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(state)
    }

    /// Save state to disk using atomic write.
    ///
    /// Uses the write-to-temp-then-rename pattern so the state file is
    /// never partially written.
    pub fn save(&self, state_dir: &Path) -> Result<()> {
        fs::create_dir_all(state_dir)?;

        let path = Self::state_file(state_dir);
        let content = serde_yaml::to_string(self).map_err(|e| RackError::StateError {
            path: path.clone(),
            message: format!("Failed to serialize state: {}", e),
        })?;

        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    // --- Deferred Events ---

    /// Queue an event for the next dispatch.
    ///
    /// Events carry no payload, so one queued instance per kind is enough.
    /// Returns `false` if that kind was already queued.
    pub fn defer(&mut self, event: EventKind) -> bool {
        if self.is_deferred(event) {
            return false;
        }
        self.deferred.push(DeferredEvent::new(event));
        true
    }

    /// Whether an event of this kind is waiting.
    pub fn is_deferred(&self, event: EventKind) -> bool {
        self.deferred.iter().any(|d| d.event == event)
    }

    /// Take the whole queue, leaving it empty.
    pub fn take_deferred(&mut self) -> Vec<DeferredEvent> {
        std::mem::take(&mut self.deferred)
    }

    // --- History ---

    /// Record a dispatched event.
    pub fn record(&mut self, record: EventRecord) {
        self.last_dispatch = Some(record.timestamp);
        self.history.insert(0, record);
    }

    /// Get the most recent event record.
    pub fn last_event(&self) -> Option<&EventRecord> {
        self.history.first()
    }

    /// Prune old history.
    pub fn prune_history(&mut self, keep: usize) {
        if self.history.len() > keep {
            self.history.truncate(keep);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::history::EventResult;
    use tempfile::TempDir;

    #[test]
    fn state_store_new() {
        let state = StateStore::new();
        assert_eq!(state.version, StateStore::CURRENT_VERSION);
        assert_eq!(state.status, UnitStatus::initial());
        assert!(state.deferred.is_empty());
        assert!(state.last_dispatch.is_none());
    }

    #[test]
    fn state_store_save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut state = StateStore::new();
        state.status = UnitStatus::Blocked("charmed-kafka snap not installed".into());
        state.defer(EventKind::Install);
        state.record(EventRecord::new(
            EventKind::Install,
            EventResult::Deferred,
            false,
        ));

        state.save(temp.path()).unwrap();
        let loaded = StateStore::load(temp.path()).unwrap();

        assert_eq!(loaded.status, state.status);
        assert_eq!(loaded.deferred, state.deferred);
        assert_eq!(loaded.history.len(), 1);
        assert!(loaded.last_dispatch.is_some());
    }

    #[test]
    fn state_store_load_nonexistent_returns_new() {
        let temp = TempDir::new().unwrap();
        let state = StateStore::load(&temp.path().join("missing")).unwrap();
        assert_eq!(state.status, UnitStatus::initial());
    }

    #[test]
    fn load_corrupt_state_is_state_error() {
        let temp = TempDir::new().unwrap();
        fs::write(StateStore::state_file(temp.path()), "status: [").unwrap();

        let err = StateStore::load(temp.path()).unwrap_err();
        assert!(matches!(err, RackError::StateError { .. }));
    }

    #[test]
    fn save_uses_atomic_write() {
        let temp = TempDir::new().unwrap();
        StateStore::new().save(temp.path()).unwrap();

        assert!(StateStore::state_file(temp.path()).exists());
        assert!(!temp.path().join("state.yml.tmp").exists());
    }

    #[test]
    fn defer_keeps_one_per_kind() {
        let mut state = StateStore::new();
        assert!(state.defer(EventKind::ConfigChanged));
        assert!(state.defer(EventKind::Install));
        assert!(!state.defer(EventKind::ConfigChanged));

        let kinds: Vec<_> = state.deferred.iter().map(|d| d.event).collect();
        assert_eq!(kinds, vec![EventKind::ConfigChanged, EventKind::Install]);
    }

    #[test]
    fn take_deferred_empties_queue() {
        let mut state = StateStore::new();
        state.defer(EventKind::Install);

        let taken = state.take_deferred();
        assert_eq!(taken.len(), 1);
        assert!(state.deferred.is_empty());
        assert!(!state.is_deferred(EventKind::Install));
    }

    #[test]
    fn history_is_most_recent_first() {
        let mut state = StateStore::new();
        state.record(EventRecord::new(EventKind::Install, EventResult::Handled, false));
        state.record(EventRecord::new(
            EventKind::ConfigChanged,
            EventResult::Handled,
            false,
        ));

        assert_eq!(state.last_event().unwrap().event, EventKind::ConfigChanged);
    }

    #[test]
    fn prune_history_keeps_recent() {
        let mut state = StateStore::new();
        for _ in 0..10 {
            state.record(EventRecord::new(
                EventKind::UpdateStatus,
                EventResult::Handled,
                false,
            ));
        }

        state.prune_history(3);
        assert_eq!(state.history.len(), 3);

        state.prune_history(5);
        assert_eq!(state.history.len(), 3);
    }
}
