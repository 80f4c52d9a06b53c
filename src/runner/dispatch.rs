//! The dispatch loop around the reconciler.
//!
//! One call to [`Dispatcher::dispatch`] is one dispatch opportunity:
//!
//! 1. Load the persisted [`StateStore`]
//! 2. Re-emit every deferred event, oldest first
//! 3. Handle the incoming event
//! 4. Persist the status, the remaining queue and the history
//!
//! If a handler fails, the status committed before that event is kept, the
//! failing event is recorded as failed, and the error is returned. Deferred
//! events that had not run yet stay queued.

use std::collections::VecDeque;
use std::path::PathBuf;

use crate::config::ConfigSource;
use crate::error::Result;
use crate::presence::PresenceOracle;
use crate::state::{DeferredEvent, EventRecord, EventResult, StateStore};
use crate::unit::{EventKind, Outcome, Reconciler, UnitStatus};
use crate::writer::FileWriter;

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchReport {
    /// Status committed at the end of the dispatch.
    pub status: UnitStatus,

    /// Events that ran to completion, in order.
    pub handled: Vec<EventKind>,

    /// Events still waiting for a later dispatch.
    pub deferred: Vec<EventKind>,
}

impl DispatchReport {
    /// Whether the incoming event (or an earlier one) was left queued.
    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }
}

/// An event in the current dispatch.
enum Pending {
    Reemit(DeferredEvent),
    Incoming(EventKind),
}

impl Pending {
    fn event(&self) -> EventKind {
        match self {
            Pending::Reemit(d) => d.event,
            Pending::Incoming(e) => *e,
        }
    }

    fn is_reemit(&self) -> bool {
        matches!(self, Pending::Reemit(_))
    }
}

/// Runs lifecycle events against persisted unit state.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    state_dir: PathBuf,
    config: ConfigSource,
}

impl Dispatcher {
    /// Create a dispatcher over a state directory and config source.
    pub fn new(state_dir: impl Into<PathBuf>, config: ConfigSource) -> Self {
        Self {
            state_dir: state_dir.into(),
            config,
        }
    }

    /// Dispatch `event`, re-emitting deferred events first.
    pub fn dispatch<O, W>(&self, event: EventKind, oracle: O, writer: W) -> Result<DispatchReport>
    where
        O: PresenceOracle,
        W: FileWriter,
    {
        let mut state = StateStore::load(&self.state_dir)?;
        let mut reconciler = Reconciler::with_status(oracle, writer, state.status.clone());
        let mut handled = Vec::new();

        let mut pending: VecDeque<Pending> = state
            .take_deferred()
            .into_iter()
            .map(Pending::Reemit)
            .collect();
        pending.push_back(Pending::Incoming(event));

        tracing::debug!(
            "Dispatching {} with {} deferred event(s)",
            event,
            pending.len() - 1
        );

        while let Some(item) = pending.pop_front() {
            let kind = item.event();
            let result = self
                .config
                .load()
                .and_then(|config| reconciler.handle(kind, &config));

            let outcome = match result {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("{} failed: {}", kind, e);
                    state.record(EventRecord::new(kind, EventResult::Failed, item.is_reemit()));
                    // The failing re-emit and those not yet run stay queued, in order.
                    if let Pending::Reemit(mut d) = item {
                        d.attempts += 1;
                        state.deferred.push(d);
                    }
                    for rest in pending {
                        if let Pending::Reemit(d) = rest {
                            state.deferred.push(d);
                        }
                    }
                    self.commit(&mut state)?;
                    return Err(e);
                }
            };

            state.status = reconciler.status().clone();
            state.record(EventRecord::new(kind, outcome.into(), item.is_reemit()));

            match (outcome, item) {
                (Outcome::Handled, _) => handled.push(kind),
                (Outcome::Deferred, Pending::Reemit(mut d)) => {
                    d.attempts += 1;
                    tracing::debug!("{} deferred again (attempt {})", kind, d.attempts);
                    state.deferred.push(d);
                }
                (Outcome::Deferred, Pending::Incoming(kind)) => {
                    if !state.defer(kind) {
                        tracing::debug!("{} already queued", kind);
                    }
                }
            }
        }

        self.commit(&mut state)?;

        Ok(DispatchReport {
            status: state.status.clone(),
            handled,
            deferred: state.deferred.iter().map(|d| d.event).collect(),
        })
    }

    fn commit(&self, state: &mut StateStore) -> Result<()> {
        state.prune_history(StateStore::DEFAULT_HISTORY_RETENTION);
        state.save(&self.state_dir)
    }
}
