//! Lifecycle event handlers.
//!
//! The [`Reconciler`] owns the unit status and turns lifecycle events into
//! status changes and writes of the rack properties file. It never re-queues
//! anything itself: handlers return an [`Outcome`] and the dispatch loop
//! decides what deferral means.

use crate::config::{rack_properties, RackValue, Settings, UnitConfig};
use crate::error::Result;
use crate::presence::PresenceOracle;
use crate::writer::FileWriter;

use super::event::{EventKind, Outcome};
use super::status::UnitStatus;

/// Translates lifecycle events into status and file-state changes.
pub struct Reconciler<O, W> {
    oracle: O,
    writer: W,
    status: UnitStatus,
}

impl<O: PresenceOracle, W: FileWriter> Reconciler<O, W> {
    /// Create a reconciler for a fresh unit.
    pub fn new(oracle: O, writer: W) -> Self {
        Self::with_status(oracle, writer, UnitStatus::initial())
    }

    /// Create a reconciler resuming from a persisted status.
    pub fn with_status(oracle: O, writer: W, status: UnitStatus) -> Self {
        Self {
            oracle,
            writer,
            status,
        }
    }

    /// Current unit status.
    pub fn status(&self) -> &UnitStatus {
        &self.status
    }

    /// Route an event to its handler.
    pub fn handle(&mut self, event: EventKind, config: &UnitConfig) -> Result<Outcome> {
        match event {
            EventKind::Install => self.on_install(),
            EventKind::ConfigChanged => self.on_config_changed(config),
            EventKind::UpdateStatus => Ok(Outcome::Handled),
        }
    }

    /// Activate once the managed package is installed.
    pub fn on_install(&mut self) -> Result<Outcome> {
        if self.oracle.is_present()? {
            tracing::info!("{} is installed", self.oracle.package());
            self.status = UnitStatus::Active(String::new());
            Ok(Outcome::Handled)
        } else {
            let package = self.oracle.package();
            tracing::info!("{} is not installed, deferring install", package);
            self.status = UnitStatus::Blocked(format!("{} snap not installed", package));
            Ok(Outcome::Deferred)
        }
    }

    /// Write the rack identifier while the unit is active.
    ///
    /// Write and chown errors are returned as-is; the event is not deferred.
    pub fn on_config_changed(&mut self, config: &UnitConfig) -> Result<Outcome> {
        if !self.status.is_active() {
            tracing::info!("Unit is {}, deferring config-changed", self.status.name());
            return Ok(Outcome::Deferred);
        }

        let rack = match config.broker_rack() {
            RackValue::Valid(rack) => rack,
            RackValue::Unset => {
                tracing::info!("No broker-rack configured, nothing to write");
                return Ok(Outcome::Handled);
            }
            RackValue::Invalid(raw) => {
                tracing::warn!("Ignoring broker-rack {:?}: must be a single line", raw);
                return Ok(Outcome::Handled);
            }
        };

        let previous = std::mem::replace(
            &mut self.status,
            UnitStatus::Maintenance("writing rack properties".to_string()),
        );
        self.write_rack(&config.settings, &rack)?;
        self.status = previous;

        Ok(Outcome::Handled)
    }

    fn write_rack(&self, settings: &Settings, rack: &str) -> Result<()> {
        let path = &settings.target_path;
        self.writer.write(path, &rack_properties(rack))?;
        self.writer.chown(path, &settings.owner, &settings.group)?;
        tracing::info!("Set broker.rack={} in {}", rack, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RackError;
    use std::cell::{Cell, RefCell};
    use std::path::{Path, PathBuf};

    const TARGET: &str = "/var/snap/charmed-kafka/current/etc/kafka/rack.properties";

    struct FakeOracle {
        present: Cell<bool>,
    }

    impl FakeOracle {
        fn new(present: bool) -> Self {
            Self {
                present: Cell::new(present),
            }
        }
    }

    impl PresenceOracle for FakeOracle {
        fn package(&self) -> &str {
            "charmed-kafka"
        }

        fn is_present(&self) -> Result<bool> {
            Ok(self.present.get())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Write { path: PathBuf, content: String },
        Chown { path: PathBuf, user: String, group: String },
    }

    #[derive(Default)]
    struct RecordingWriter {
        calls: RefCell<Vec<Call>>,
        fail_writes: bool,
    }

    impl FileWriter for RecordingWriter {
        fn write(&self, path: &Path, content: &str) -> Result<()> {
            if self.fail_writes {
                return Err(RackError::WriteFailed {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                });
            }
            self.calls.borrow_mut().push(Call::Write {
                path: path.to_path_buf(),
                content: content.to_string(),
            });
            Ok(())
        }

        fn chown(&self, path: &Path, user: &str, group: &str) -> Result<()> {
            self.calls.borrow_mut().push(Call::Chown {
                path: path.to_path_buf(),
                user: user.to_string(),
                group: group.to_string(),
            });
            Ok(())
        }
    }

    fn rack_config(rack: &str) -> UnitConfig {
        serde_yaml::from_str(&format!("options:\n  broker-rack: {}\n", rack)).unwrap()
    }

    fn expected_calls(rack: &str) -> Vec<Call> {
        vec![
            Call::Write {
                path: PathBuf::from(TARGET),
                content: format!("broker.rack={}", rack),
            },
            Call::Chown {
                path: PathBuf::from(TARGET),
                user: "snap_daemon".into(),
                group: "root".into(),
            },
        ]
    }

    #[test]
    fn install_with_package_activates() {
        let mut reconciler = Reconciler::new(FakeOracle::new(true), RecordingWriter::default());

        let outcome = reconciler.on_install().unwrap();
        assert_eq!(outcome, Outcome::Handled);
        assert!(reconciler.status().is_active());
    }

    #[test]
    fn install_without_package_blocks_and_defers() {
        let mut reconciler = Reconciler::new(FakeOracle::new(false), RecordingWriter::default());

        let outcome = reconciler.on_install().unwrap();
        assert_eq!(outcome, Outcome::Deferred);
        assert!(matches!(reconciler.status(), UnitStatus::Blocked(m) if m.contains("charmed-kafka")));
    }

    #[test]
    fn install_recovers_once_package_appears() {
        let mut reconciler = Reconciler::new(FakeOracle::new(false), RecordingWriter::default());
        assert_eq!(reconciler.on_install().unwrap(), Outcome::Deferred);

        reconciler.oracle.present.set(true);
        assert_eq!(reconciler.on_install().unwrap(), Outcome::Handled);
        assert!(reconciler.status().is_active());
    }

    #[test]
    fn config_changed_while_active_writes_and_chowns() {
        let mut reconciler = Reconciler::with_status(
            FakeOracle::new(true),
            RecordingWriter::default(),
            UnitStatus::Active(String::new()),
        );

        let outcome = reconciler.on_config_changed(&rack_config("us-west")).unwrap();
        assert_eq!(outcome, Outcome::Handled);
        assert_eq!(*reconciler.writer.calls.borrow(), expected_calls("us-west"));
        assert!(reconciler.status().is_active());
    }

    #[test]
    fn config_changed_while_blocked_defers_without_writing() {
        let mut reconciler = Reconciler::with_status(
            FakeOracle::new(false),
            RecordingWriter::default(),
            UnitStatus::Blocked("charmed-kafka snap not installed".into()),
        );

        let outcome = reconciler.on_config_changed(&rack_config("us-west")).unwrap();
        assert_eq!(outcome, Outcome::Deferred);
        assert!(reconciler.writer.calls.borrow().is_empty());
        assert!(matches!(reconciler.status(), UnitStatus::Blocked(_)));
    }

    #[test]
    fn config_changed_before_install_defers() {
        let mut reconciler = Reconciler::new(FakeOracle::new(true), RecordingWriter::default());

        let outcome = reconciler.on_config_changed(&rack_config("us-west")).unwrap();
        assert_eq!(outcome, Outcome::Deferred);
        assert!(reconciler.writer.calls.borrow().is_empty());
    }

    #[test]
    fn repeated_config_changed_overwrites_identically() {
        let mut reconciler = Reconciler::with_status(
            FakeOracle::new(true),
            RecordingWriter::default(),
            UnitStatus::Active(String::new()),
        );
        let config = rack_config("us-west");

        reconciler.on_config_changed(&config).unwrap();
        reconciler.on_config_changed(&config).unwrap();

        let mut expected = expected_calls("us-west");
        expected.extend(expected_calls("us-west"));
        assert_eq!(*reconciler.writer.calls.borrow(), expected);
    }

    #[test]
    fn unset_rack_writes_nothing() {
        let mut reconciler = Reconciler::with_status(
            FakeOracle::new(true),
            RecordingWriter::default(),
            UnitStatus::Active(String::new()),
        );

        let outcome = reconciler.on_config_changed(&UnitConfig::default()).unwrap();
        assert_eq!(outcome, Outcome::Handled);
        assert!(reconciler.writer.calls.borrow().is_empty());
        assert!(reconciler.status().is_active());
    }

    #[test]
    fn multiline_rack_writes_nothing() {
        let mut reconciler = Reconciler::with_status(
            FakeOracle::new(true),
            RecordingWriter::default(),
            UnitStatus::Active(String::new()),
        );

        let outcome = reconciler
            .on_config_changed(&rack_config("\"a\\nb\""))
            .unwrap();
        assert_eq!(outcome, Outcome::Handled);
        assert!(reconciler.writer.calls.borrow().is_empty());
    }

    #[test]
    fn write_failure_is_fatal_and_not_deferred() {
        let writer = RecordingWriter {
            fail_writes: true,
            ..Default::default()
        };
        let mut reconciler = Reconciler::with_status(
            FakeOracle::new(true),
            writer,
            UnitStatus::Active(String::new()),
        );

        let err = reconciler
            .on_config_changed(&rack_config("us-west"))
            .unwrap_err();
        assert!(matches!(err, RackError::WriteFailed { .. }));
        assert!(matches!(reconciler.status(), UnitStatus::Maintenance(_)));
        assert!(reconciler.writer.calls.borrow().is_empty());
    }

    #[test]
    fn custom_settings_are_honoured() {
        let mut config = rack_config("eu-1");
        config.settings.target_path = PathBuf::from("/tmp/rack.properties");
        config.settings.owner = "kafka".into();
        config.settings.group = "kafka".into();

        let mut reconciler = Reconciler::with_status(
            FakeOracle::new(true),
            RecordingWriter::default(),
            UnitStatus::Active(String::new()),
        );
        reconciler.on_config_changed(&config).unwrap();

        assert_eq!(
            reconciler.writer.calls.borrow()[1],
            Call::Chown {
                path: PathBuf::from("/tmp/rack.properties"),
                user: "kafka".into(),
                group: "kafka".into(),
            }
        );
    }

    #[test]
    fn update_status_changes_nothing() {
        let mut reconciler = Reconciler::new(FakeOracle::new(false), RecordingWriter::default());

        let outcome = reconciler
            .handle(EventKind::UpdateStatus, &UnitConfig::default())
            .unwrap();
        assert_eq!(outcome, Outcome::Handled);
        assert_eq!(reconciler.status(), &UnitStatus::initial());
    }
}
