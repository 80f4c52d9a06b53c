//! Event dispatch around the reconciler.
//!
//! - [`dispatch`] - Deferred-event re-emission and state persistence

pub mod dispatch;

pub use dispatch::{DispatchReport, Dispatcher};
