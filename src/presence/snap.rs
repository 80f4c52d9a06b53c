//! snapd-backed presence oracle.

use std::io::ErrorKind;

use crate::error::{RackError, Result};
use crate::shell::execute;

use super::PresenceOracle;

/// Checks a snap with `snap list <name>`.
///
/// Exit code 0 means installed. A non-zero exit means not installed. A host
/// without a snap client cannot have the snap either, so a missing client
/// also reads as not installed.
#[derive(Debug, Clone)]
pub struct SnapPresence {
    package: String,
    snap_command: String,
}

impl SnapPresence {
    /// Check `package` using the `snap` found on PATH.
    pub fn new(package: impl Into<String>) -> Self {
        Self::with_command(package, "snap")
    }

    /// Check `package` using a specific snap client.
    pub fn with_command(package: impl Into<String>, snap_command: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            snap_command: snap_command.into(),
        }
    }
}

impl PresenceOracle for SnapPresence {
    fn package(&self) -> &str {
        &self.package
    }

    fn is_present(&self) -> Result<bool> {
        let result = match execute(&self.snap_command, &["list", self.package.as_str()]) {
            Ok(result) => result,
            Err(RackError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("{} not found, treating {} as absent", self.snap_command, self.package);
                return Ok(false);
            }
            Err(e) => {
                return Err(RackError::PresenceCheckFailed {
                    package: self.package.clone(),
                    message: e.to_string(),
                })
            }
        };

        if !result.success {
            tracing::debug!(
                "{} list {} exited with {:?}: {}",
                self.snap_command,
                self.package,
                result.exit_code,
                result.stderr.trim()
            );
        }

        Ok(result.success)
    }
}
