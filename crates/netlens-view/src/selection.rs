#![forbid(unsafe_code)]

//! Selected-record tracking for the request list.
//!
//! Selection follows the filtered result list: clicking a row toggles it,
//! and a selection whose record disappears from the current results (a
//! filter change, a clear, an eviction) is dropped so the detail panel
//! never shows a record the list no longer contains.

use serde::{Deserialize, Serialize};

/// The currently selected record id, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    selected_id: Option<String>,
}

impl SelectionState {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected id, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Whether `id` is the current selection.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id.as_deref() == Some(id)
    }

    /// Select `id`, or deselect when it is already selected.
    pub fn toggle(&mut self, id: &str) {
        if self.is_selected(id) {
            self.selected_id = None;
        } else {
            self.selected_id = Some(id.to_owned());
        }
    }

    /// Select `id` unconditionally.
    pub fn select(&mut self, id: impl Into<String>) {
        self.selected_id = Some(id.into());
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected_id = None;
    }

    /// Drop the selection unless its id appears in `ids` (the current
    /// result list).
    pub fn retain_present<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        if let Some(selected) = self.selected_id.as_deref()
            && !ids.into_iter().any(|id| id == selected)
        {
            self.selected_id = None;
        }
    }
}
