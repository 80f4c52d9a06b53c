//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the unit's
//! YAML configuration file:
//!
//! ```yaml
//! options:
//!   broker-rack: us-west
//! settings:
//!   target_path: /var/snap/charmed-kafka/current/etc/kafka/rack.properties
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Option key carrying the rack identifier.
pub const BROKER_RACK_OPTION: &str = "broker-rack";

/// Property name written into the target file.
pub const BROKER_RACK_PROPERTY: &str = "broker.rack";

/// Root configuration structure for the unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    /// Operator-supplied options, keyed by option name.
    pub options: BTreeMap<String, serde_yaml::Value>,

    /// Fixed values of the managed workload.
    pub settings: Settings,
}

/// Where and as whom the properties file is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Snap whose presence gates activation.
    pub package: String,

    /// Properties file owned by the workload.
    pub target_path: PathBuf,

    /// Owning user (name or numeric uid).
    pub owner: String,

    /// Owning group (name or numeric gid).
    pub group: String,

    /// snapd client used for presence checks.
    pub snap_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            package: "charmed-kafka".to_string(),
            target_path: PathBuf::from("/var/snap/charmed-kafka/current/etc/kafka/rack.properties"),
            owner: "snap_daemon".to_string(),
            group: "root".to_string(),
            snap_command: "snap".to_string(),
        }
    }
}

/// Validation result for the `broker-rack` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RackValue {
    /// Option absent or blank.
    Unset,
    /// Option present but cannot go into a one-line properties file.
    Invalid(String),
    /// Option present and well-formed.
    Valid(String),
}

// No control characters: the value must stay on one line.
static RACK_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\p{Cc}]+$").unwrap());

impl UnitConfig {
    /// Get an option as a string.
    ///
    /// Scalars are stringified so `broker-rack: 3` reads as `"3"`.
    /// Mappings, sequences and nulls read as absent.
    pub fn option(&self, key: &str) -> Option<String> {
        match self.options.get(key)? {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Read and validate the rack identifier.
    pub fn broker_rack(&self) -> RackValue {
        match self.option(BROKER_RACK_OPTION) {
            None => RackValue::Unset,
            Some(v) if v.trim().is_empty() => RackValue::Unset,
            Some(v) if RACK_PATTERN.is_match(&v) => RackValue::Valid(v),
            Some(v) => RackValue::Invalid(v),
        }
    }
}

/// Render the single properties line for a rack identifier.
pub fn rack_properties(rack: &str) -> String {
    format!("{}={}", BROKER_RACK_PROPERTY, rack)
}
