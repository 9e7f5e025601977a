#![forbid(unsafe_code)]

//! View-support layer: viewport windowing math and selection state.
//!
//! # Role in netlens
//! `netlens-view` turns an unbounded logical result list into the small
//! contiguous slice the presentation layer actually materializes. It is
//! stateless math plus one tiny piece of UI state (the selected record);
//! it never touches records or the store.
//!
//! # Primary responsibilities
//! - **[`Viewport`]**: computes the visible index range for a scroll
//!   position, with buffer rows above and below and the padding offsets
//!   needed to position the slice inside a full-height scroll container.
//! - **[`SelectionState`]**: tracks which record is selected and drops the
//!   selection when filtering removes it from the result list.

pub mod selection;
pub mod viewport;

pub use selection::SelectionState;
pub use viewport::{DEFAULT_BUFFER_COUNT, Viewport, VisibleRange};
