//! Error types for rack-awareness operations.
//!
//! This module defines [`RackError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Deferral is not an error: handlers return
//!   [`Outcome::Deferred`](crate::unit::Outcome) instead
//! - Write and chown failures are fatal to the triggering event and surface
//!   here unchanged
//! - Use `anyhow::Error` (via `RackError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rack-awareness operations.
#[derive(Debug, Error)]
pub enum RackError {
    /// Unit config file not found at the requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the unit config file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A `--set key=value` override could not be parsed.
    #[error("Invalid override '{raw}': expected key=value")]
    InvalidOverride { raw: String },

    /// The presence oracle could not answer.
    #[error("Presence check failed for '{package}': {message}")]
    PresenceCheckFailed { package: String, message: String },

    /// Writing the target file failed.
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Changing ownership of the target file failed.
    #[error("Failed to chown {path} to {user}:{group}: {source}")]
    ChownFailed {
        path: PathBuf,
        user: String,
        group: String,
        #[source]
        source: std::io::Error,
    },

    /// A user or group name has no entry in the account database.
    #[error("Unknown {kind} '{name}'")]
    UnknownAccount { kind: &'static str, name: String },

    /// Persisted unit state could not be read or written.
    #[error("State error at {path}: {message}")]
    StateError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for rack-awareness operations.
pub type Result<T> = std::result::Result<T, RackError>;
