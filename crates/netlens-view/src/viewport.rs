#![forbid(unsafe_code)]

//! Visible-range computation for virtualized list rendering.
//!
//! Given a list length, a fixed item height, and the current scroll state,
//! [`Viewport::visible_range`] computes the minimal contiguous index range
//! to materialize, padded by buffer rows above and below so fast scrolling
//! never outruns the rendered slice. The caller positions the slice with
//! [`VisibleRange::top_padding`] inside a container of
//! [`VisibleRange::total_height`], so off-screen items are never rendered.
//!
//! The computation is stateless and pure; the caller re-invokes it on
//! scroll, on viewport resize, and whenever the list length changes.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Default number of buffer rows rendered above and below the viewport.
pub const DEFAULT_BUFFER_COUNT: usize = 5;

/// Windowing parameters: fixed item height plus buffer row count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    item_height: f64,
    buffer_count: usize,
}

impl Viewport {
    /// Create a viewport for items of a fixed height (pixels or abstract
    /// units), with [`DEFAULT_BUFFER_COUNT`] buffer rows.
    ///
    /// A non-finite or non-positive height falls back to 1.0; degenerate
    /// inputs clamp rather than error.
    #[must_use]
    pub fn new(item_height: f64) -> Self {
        Self {
            item_height: if item_height.is_finite() && item_height > 0.0 {
                item_height
            } else {
                1.0
            },
            buffer_count: DEFAULT_BUFFER_COUNT,
        }
    }

    /// Set the buffer row count.
    #[must_use]
    pub fn with_buffer_count(mut self, buffer_count: usize) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    /// The item height in effect.
    #[must_use]
    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    /// The buffer row count in effect.
    #[must_use]
    pub fn buffer_count(&self) -> usize {
        self.buffer_count
    }

    /// Compute the index range to materialize for the current scroll state.
    ///
    /// Guarantees `0 <= start <= end <= total_items`. Negative or NaN
    /// scroll offsets and viewport heights are treated as 0.
    #[must_use]
    pub fn visible_range(
        &self,
        total_items: usize,
        scroll_offset: f64,
        viewport_height: f64,
    ) -> VisibleRange {
        let scroll = sanitize(scroll_offset);
        let viewport = sanitize(viewport_height);

        // f64-to-usize casts saturate, so huge scroll offsets stay safe.
        let first_visible = (scroll / self.item_height).floor() as usize;
        let last_visible = ((scroll + viewport) / self.item_height).ceil() as usize;

        let end = last_visible
            .saturating_add(self.buffer_count)
            .min(total_items);
        let start = first_visible.saturating_sub(self.buffer_count).min(end);

        VisibleRange {
            start,
            end,
            top_padding: start as f64 * self.item_height,
            total_height: total_items as f64 * self.item_height,
        }
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// A computed render window over the logical list.
///
/// Indexes are in list space (`0` = first item, `total` = one past the
/// last). The slice `[start, end)` is what the caller materializes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleRange {
    /// First index to render (inclusive).
    pub start: usize,
    /// One past the last index to render (exclusive).
    pub end: usize,
    /// Offset of the rendered slice from the top of the scroll container.
    pub top_padding: f64,
    /// Full logical height of the list, for the scroll container.
    pub total_height: f64,
}

impl VisibleRange {
    /// The range to materialize.
    #[inline]
    #[must_use]
    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of items to materialize.
    #[inline]
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Whether nothing needs rendering.
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}
