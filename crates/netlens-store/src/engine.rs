#![forbid(unsafe_code)]

//! Memoizing filter engine over the store's ordered snapshot.
//!
//! The presentation layer re-queries on every filter keystroke and on every
//! ingest notification, usually with criteria identical to the previous
//! call. [`FilterEngine`] holds a single-slot cache keyed by the criteria
//! value and the store's mutation generation: repeated identical queries
//! between mutations are answered from the slot, and any mutation
//! invalidates the whole slot unconditionally. Coarse invalidation is a
//! deliberate tradeoff — mutation frequency is bounded by real network
//! traffic, not by consumer query rates.

use std::rc::Rc;

use tracing::debug;

use netlens_core::{EventRecord, FilterCriteria};

use crate::store::EventStore;

/// The most recently computed `(criteria, result)` pair.
#[derive(Debug, Clone)]
struct CacheSlot {
    criteria: FilterCriteria,
    generation: u64,
    results: Vec<Rc<EventRecord>>,
}

/// Evaluates a [`FilterCriteria`] against an [`EventStore`] with single-slot
/// result memoization.
///
/// Holds no record ownership — results are shared handles into the store's
/// snapshot and must be treated as read-only views.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    slot: Option<CacheSlot>,
}

impl FilterEngine {
    /// Create an engine with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The ordered records satisfying every present criteria key, most
    /// recent first.
    ///
    /// Empty criteria return the store's full ordered snapshot with no
    /// filtering or caching cost. Otherwise the result is served from the
    /// cache when `criteria` is structurally equal to the cached criteria
    /// and no mutation happened since, and recomputed (and re-cached)
    /// otherwise.
    pub fn query(&mut self, store: &EventStore, criteria: &FilterCriteria) -> Vec<Rc<EventRecord>> {
        if criteria.is_empty() {
            return store.get_all_ordered();
        }

        if let Some(slot) = &self.slot
            && slot.generation == store.generation()
            && slot.criteria == *criteria
        {
            return slot.results.clone();
        }

        let compiled = criteria.compile();
        let results: Vec<Rc<EventRecord>> = store
            .get_all_ordered()
            .into_iter()
            .filter(|record| compiled.matches(record))
            .collect();
        debug!(
            total = store.len(),
            matched = results.len(),
            "filter recomputed"
        );
        self.slot = Some(CacheSlot {
            criteria: criteria.clone(),
            generation: store.generation(),
            results: results.clone(),
        });
        results
    }

    /// Drop the cached result, forcing the next query to recompute.
    ///
    /// Mutations invalidate implicitly via the store's generation; this is
    /// for consumers that swap the store out from under the engine.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// Whether a result is currently cached (test/diagnostic hook).
    #[must_use]
    pub fn has_cached_result(&self) -> bool {
        self.slot.is_some()
    }
}
