#![forbid(unsafe_code)]

//! Bounded, insertion-time-ordered retention of captured exchanges.
//!
//! [`EventStore`] keeps the most recent [`DEFAULT_CAPACITY`] records keyed
//! by id, with an ordering index sorted ascending by the numeric id value.
//! When a new id arrives at capacity, the single oldest record is evicted
//! first. Eviction is strict FIFO by insertion-time id, never by access
//! recency: recent traffic is always more relevant than old traffic for a
//! live-inspection tool.
//!
//! Every content mutation bumps a generation counter; downstream caches
//! compare generations instead of receiving invalidation callbacks.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use netlens_core::EventRecord;

/// Default retention window, in records.
pub const DEFAULT_CAPACITY: usize = 1000;

/// What a [`EventStore::submit`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new record was inserted (evicting the oldest if at capacity).
    Inserted,
    /// An existing id was replaced with different content.
    Updated,
    /// An existing id was re-submitted with identical content; no-op.
    Unchanged,
    /// The record had an empty id and was silently dropped.
    Rejected,
}

impl SubmitOutcome {
    /// Whether the store's contents changed.
    #[must_use]
    pub fn changed_store(self) -> bool {
        matches!(self, Self::Inserted | Self::Updated)
    }
}

/// Bounded, ordered, keyed store of captured exchanges.
///
/// # Invariants
///
/// 1. At most `capacity` records are held at any time.
/// 2. `ordered` holds exactly the ids in `records`, sorted ascending by
///    numeric id (ties broken by the id string).
/// 3. `generation` increments on every content mutation and never
///    otherwise.
#[derive(Debug, Clone)]
pub struct EventStore {
    /// Records keyed by id.
    records: FxHashMap<String, Rc<EventRecord>>,
    /// Ordering index: `(numeric id, id)`, ascending.
    ordered: Vec<(u64, String)>,
    /// Maximum records retained.
    capacity: usize,
    /// Mutation counter for downstream cache validity checks.
    generation: u64,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore {
    /// Create a store with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a store with a custom capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "EventStore capacity must be greater than 0");
        Self {
            records: FxHashMap::default(),
            ordered: Vec::new(),
            capacity,
            generation: 0,
        }
    }

    /// Insert or replace the record keyed by its id.
    ///
    /// A record with an empty id is silently rejected: the capture layer
    /// legitimately skips malformed exchanges and the live view must keep
    /// functioning. Re-submission with identical content is a no-op. If the
    /// store is at capacity and the id is new, the single oldest record is
    /// evicted before the insert.
    pub fn submit(&mut self, record: EventRecord) -> SubmitOutcome {
        if record.id.is_empty() {
            debug!("dropped record with empty id");
            return SubmitOutcome::Rejected;
        }

        if let Some(existing) = self.records.get(&record.id) {
            if **existing == record {
                return SubmitOutcome::Unchanged;
            }
            debug!(id = %record.id, "record updated");
            self.records.insert(record.id.clone(), Rc::new(record));
            self.generation += 1;
            return SubmitOutcome::Updated;
        }

        if self.records.len() >= self.capacity
            && let Some((_, oldest_id)) = self.ordered.first().cloned()
        {
            self.records.remove(&oldest_id);
            self.ordered.remove(0);
            debug!(id = %oldest_id, "evicted oldest record at capacity");
        }

        let key = (record.numeric_id(), record.id.clone());
        let pos = self.ordered.partition_point(|entry| *entry < key);
        self.ordered.insert(pos, key);
        debug!(id = %record.id, len = self.records.len() + 1, "record inserted");
        self.records.insert(record.id.clone(), Rc::new(record));
        self.generation += 1;
        SubmitOutcome::Inserted
    }

    /// Remove all records and the ordering index.
    pub fn clear(&mut self) {
        info!(len = self.records.len(), "store cleared");
        self.records.clear();
        self.ordered.clear();
        self.generation += 1;
    }

    /// Look up a record by id. No side effects.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<Rc<EventRecord>> {
        self.records.get(id).cloned()
    }

    /// All current records in descending id order (most recent first).
    ///
    /// This is the canonical read order for all consumers.
    #[must_use]
    pub fn get_all_ordered(&self) -> Vec<Rc<EventRecord>> {
        self.ordered
            .iter()
            .rev()
            .filter_map(|(_, id)| self.records.get(id).cloned())
            .collect()
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum records retained.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current mutation generation. Increments on every `submit` that
    /// changes contents and on every `clear`.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
