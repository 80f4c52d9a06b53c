//! The operator unit: status, lifecycle events and the reconciler.
//!
//! # Modules
//!
//! - [`event`] - Lifecycle event kinds and handler outcomes
//! - [`reconciler`] - Event handlers that own the unit status
//! - [`status`] - Unit status reported to the lifecycle framework

pub mod event;
pub mod reconciler;
pub mod status;

pub use event::{EventKind, Outcome};
pub use reconciler::Reconciler;
pub use status::UnitStatus;
