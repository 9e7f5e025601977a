#![forbid(unsafe_code)]

//! The per-session object wiring store, filter engine, and notifier.
//!
//! One [`InspectionSession`] exists per inspection session: created on
//! session start (typically followed by [`clear_quiet`] to sanitize any
//! construction-time state without a spurious empty-state flash), fed by
//! the capture bridge via [`submit`], queried by the presentation layer,
//! and discarded on teardown. It is an explicitly constructed value passed
//! by reference — not a process-wide global — so tests and multi-instance
//! embeddings construct their own.
//!
//! [`submit`]: InspectionSession::submit
//! [`clear_quiet`]: InspectionSession::clear_quiet

use std::rc::Rc;

use netlens_core::{EventRecord, FilterCriteria};

use crate::engine::FilterEngine;
use crate::notify::{ChangeNotifier, Subscription};
use crate::store::{EventStore, SubmitOutcome};

/// Session facade over the bounded store, the memoizing filter engine, and
/// the change signal.
#[derive(Debug, Default)]
pub struct InspectionSession {
    store: EventStore,
    engine: FilterEngine,
    notifier: ChangeNotifier,
}

impl InspectionSession {
    /// Create a session with the default retention window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a custom retention window.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: EventStore::with_capacity(capacity),
            engine: FilterEngine::new(),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Ingest one completed exchange from the capture bridge.
    ///
    /// Emits the change signal when the store's contents changed; rejected
    /// and content-identical submissions stay silent.
    pub fn submit(&mut self, record: EventRecord) -> SubmitOutcome {
        let outcome = self.store.submit(record);
        if outcome.changed_store() {
            self.notifier.emit();
        }
        outcome
    }

    /// The ordered records satisfying `criteria`, most recent first.
    pub fn query(&mut self, criteria: &FilterCriteria) -> Vec<Rc<EventRecord>> {
        self.engine.query(&self.store, criteria)
    }

    /// Look up a record by id. No side effects.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<Rc<EventRecord>> {
        self.store.get_by_id(id)
    }

    /// Remove all records and emit the change signal.
    pub fn clear(&mut self) {
        self.store.clear();
        self.notifier.emit();
    }

    /// Remove all records without emitting.
    ///
    /// Used for session-start sanitization so consumers never render a
    /// spurious empty state.
    pub fn clear_quiet(&mut self) {
        self.store.clear();
    }

    /// Register a callback for the change signal.
    ///
    /// Keep the returned guard alive for as long as the callback should
    /// fire; dropping it unsubscribes.
    #[must_use = "dropping the subscription unsubscribes the callback"]
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.notifier.subscribe(callback)
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the session holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Read access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &EventStore {
        &self.store
    }
}
