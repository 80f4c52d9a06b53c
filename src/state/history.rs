//! Dispatch history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::unit::{EventKind, Outcome};

/// How a dispatched event ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventResult {
    Handled,
    Deferred,
    Failed,
}

impl From<Outcome> for EventResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Handled => Self::Handled,
            Outcome::Deferred => Self::Deferred,
        }
    }
}

/// One handled (or re-emitted) event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    pub event: EventKind,
    pub result: EventResult,

    /// Whether this was a re-emit of a previously deferred event.
    #[serde(default)]
    pub reemitted: bool,
}

impl EventRecord {
    pub fn new(event: EventKind, result: EventResult, reemitted: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
            result,
            reemitted,
        }
    }
}

/// An event waiting for the next dispatch opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferredEvent {
    pub event: EventKind,

    /// When the event was first deferred.
    pub deferred_at: DateTime<Utc>,

    /// How many times it has been re-emitted and deferred again.
    #[serde(default)]
    pub attempts: u32,
}

impl DeferredEvent {
    pub fn new(event: EventKind) -> Self {
        Self {
            event,
            deferred_at: Utc::now(),
            attempts: 0,
        }
    }
}
