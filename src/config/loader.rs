//! Configuration file discovery and loading.
//!
//! The unit config comes from one YAML file plus `--set key=value`
//! overrides. Overrides always land under `options:` and win over the file.

use crate::config::schema::UnitConfig;
use crate::error::{RackError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Where the unit config comes from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    /// Config file; `None` means defaults only.
    pub path: Option<PathBuf>,

    /// Option overrides in application order.
    pub overrides: Vec<(String, String)>,
}

impl ConfigSource {
    /// Resolve the config file for a run.
    ///
    /// An explicit path must exist. Without one, `config.yaml` in `cwd` is
    /// used if present.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Self {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if candidate.exists() {
                    Some(candidate)
                } else {
                    None
                }
            }
        };

        Self {
            path,
            overrides: Vec::new(),
        }
    }

    /// Add `key=value` overrides.
    pub fn with_overrides(mut self, raw: &[String]) -> Result<Self> {
        for entry in raw {
            self.overrides.push(parse_override(entry)?);
        }
        Ok(self)
    }

    /// Load the config as it is right now.
    ///
    /// Called once per handled event, so a deferred `config-changed`
    /// sees the values current at re-emit time.
    pub fn load(&self) -> Result<UnitConfig> {
        let mut config = match &self.path {
            Some(path) => load_config_file(path)?,
            None => UnitConfig::default(),
        };

        for (key, value) in &self.overrides {
            config
                .options
                .insert(key.clone(), serde_yaml::Value::String(value.clone()));
        }

        Ok(config)
    }
}

/// Split a `key=value` override. The value may itself contain `=`.
pub fn parse_override(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(RackError::InvalidOverride {
            raw: raw.to_string(),
        }),
    }
}

/// Load a single config file and parse it into [`UnitConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<UnitConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RackError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RackError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`UnitConfig`].
///
/// An empty file is the same as `{}`.
pub fn parse_config(content: &str, source_path: &Path) -> Result<UnitConfig> {
    if content.trim().is_empty() {
        return Ok(UnitConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| RackError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
