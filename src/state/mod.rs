//! Persistent unit state between dispatches.
//!
//! Tracks the committed unit status, the deferred-event queue and a short
//! event history.

pub mod history;
pub mod store;

pub use history::{DeferredEvent, EventRecord, EventResult};
pub use store::StateStore;
