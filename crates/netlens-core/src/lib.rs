#![forbid(unsafe_code)]

//! Core: the captured-exchange data model and pure filter/search helpers.
//!
//! # Role in netlens
//! `netlens-core` is the vocabulary layer. It owns the [`EventRecord`] type
//! (one observed HTTP request/response exchange), the [`FilterCriteria`]
//! predicate set applied to the live capture window, and the stateless
//! helpers those predicates are built from (case-insensitive substring
//! search, body/header normalization, status classification).
//!
//! # How it fits in the system
//! The session layer (`netlens-store`) retains `EventRecord` values in a
//! bounded window and evaluates `FilterCriteria` against it. The view layer
//! (`netlens-view`) never touches these types directly; it only windows the
//! result list. Nothing in this crate holds state.

pub mod filter;
pub mod format;
pub mod record;
pub mod search;

pub use filter::{CompiledCriteria, FilterCriteria};
pub use format::{StatusClass, format_duration, is_error_status};
pub use record::{Body, EventRecord, Headers, headers_from_pairs, timestamp_id};
