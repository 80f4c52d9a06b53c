//! Unit status reported to the surrounding lifecycle framework.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workload status of the unit.
///
/// The reconciler is the only writer; everything else reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum UnitStatus {
    /// Dependency installed and configuration applicable.
    Active(String),
    /// Needs operator intervention, e.g. the dependency package is missing.
    Blocked(String),
    /// The unit is changing the workload (writing the properties file).
    Maintenance(String),
    /// Nothing has happened yet.
    Waiting(String),
}

impl UnitStatus {
    /// Status of a unit that has not seen an install event.
    pub fn initial() -> Self {
        UnitStatus::Waiting("waiting for install".to_string())
    }

    /// Whether configuration writes are allowed.
    pub fn is_active(&self) -> bool {
        matches!(self, UnitStatus::Active(_))
    }

    /// Short state name, as shown by `status`.
    pub fn name(&self) -> &'static str {
        match self {
            UnitStatus::Active(_) => "active",
            UnitStatus::Blocked(_) => "blocked",
            UnitStatus::Maintenance(_) => "maintenance",
            UnitStatus::Waiting(_) => "waiting",
        }
    }

    /// Human-readable message attached to the status.
    pub fn message(&self) -> &str {
        match self {
            UnitStatus::Active(m)
            | UnitStatus::Blocked(m)
            | UnitStatus::Maintenance(m)
            | UnitStatus::Waiting(m) => m,
        }
    }
}

impl Default for UnitStatus {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message().is_empty() {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{}: {}", self.name(), self.message())
        }
    }
}
