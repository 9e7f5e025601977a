#![forbid(unsafe_code)]

//! Session layer: bounded event retention, memoized filtering, and change
//! notification.
//!
//! # Role in netlens
//! `netlens-store` owns all mutable state in the system. The capture bridge
//! feeds completed exchanges into an [`InspectionSession`]; the presentation
//! layer queries it and re-queries whenever the session's change signal
//! fires.
//!
//! # Primary responsibilities
//! - **[`EventStore`]**: bounded, insertion-time-ordered, keyed retention
//!   with FIFO eviction — a sliding time window, not an LRU cache.
//! - **[`FilterEngine`]**: evaluates a [`FilterCriteria`] against the store
//!   with a single-slot result cache keyed by criteria value.
//! - **[`ChangeNotifier`]**: synchronous observer list carrying a
//!   payloadless "changed" signal.
//! - **[`InspectionSession`]**: the explicitly constructed session object
//!   wiring the three together, one per inspection session.
//!
//! # Concurrency model
//! Single-threaded cooperative: every operation runs to completion on the
//! caller's thread, no operation suspends or blocks, and sharing uses `Rc`.
//! No read can observe a partially-applied submission.
//!
//! [`FilterCriteria`]: netlens_core::FilterCriteria

pub mod engine;
pub mod notify;
pub mod session;
pub mod store;

pub use engine::FilterEngine;
pub use notify::{ChangeNotifier, Subscription};
pub use session::InspectionSession;
pub use store::{DEFAULT_CAPACITY, EventStore, SubmitOutcome};
