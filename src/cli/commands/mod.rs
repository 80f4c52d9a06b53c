//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations:
//! - lifecycle events (`install`, `config-changed`, `update-status`) go
//!   through [`event::EventCommand`]
//! - `status` reads persisted state through [`status::StatusCommand`]

pub mod dispatcher;
pub mod event;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
