//! Rack awareness - broker rack configuration for the Kafka snap.
//!
//! An operator unit that waits for the `charmed-kafka` snap to be installed
//! and then writes the operator's `broker-rack` option into the snap's
//! `rack.properties`, owned by the snap's service account.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Unit configuration loading and validation
//! - [`error`] - Error types and result aliases
//! - [`presence`] - Dependency presence checks
//! - [`runner`] - The dispatch loop and deferred-event handling
//! - [`shell`] - External command execution
//! - [`state`] - Persisted unit status and deferred events
//! - [`ui`] - Terminal output
//! - [`unit`] - Unit status, lifecycle events and the reconciler
//! - [`writer`] - Properties file writes and ownership
//!
//! # Example
//!
//! ```
//! use rack_awareness::config::rack_properties;
//!
//! assert_eq!(rack_properties("us-west"), "broker.rack=us-west");
//! ```
//!
//! For end-to-end dispatching, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod presence;
pub mod runner;
pub mod shell;
pub mod state;
pub mod ui;
pub mod unit;
pub mod writer;

pub use error::{RackError, Result};
