//! Selected slot and its persisted form

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::item::NavItems;

/// Index of the selected item, always valid for the current item list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected_index: usize,
}

impl SelectionState {
    /// Select `index`, clamped into the list
    pub fn new(index: usize, items: &NavItems) -> Self {
        Self {
            selected_index: clamp_logged(index, items),
        }
    }

    pub fn index(&self) -> usize {
        self.selected_index
    }

    /// Select `index`, clamped into the list
    ///
    /// Returns `true` if the selection changed.
    pub fn select(&mut self, index: usize, items: &NavItems) -> bool {
        let index = clamp_logged(index, items);
        if index == self.selected_index {
            return false;
        }
        self.selected_index = index;
        true
    }

    /// Re-resolve the selection against a replacement item list
    ///
    /// Follows the selected id (looked up in `previous`) when it survives in
    /// `next`, and otherwise keeps the old index clamped into `next`.
    pub fn carry_over(&mut self, previous: &NavItems, next: &NavItems) {
        let id = previous.get(self.selected_index).map(|item| item.id.as_str());
        self.selected_index = match id.and_then(|id| next.index_of(id)) {
            Some(index) => index,
            None => clamp_logged(self.selected_index, next),
        };
    }

    pub fn save(&self, items: &NavItems) -> SavedSelection {
        SavedSelection {
            index: self.selected_index,
            id: items.get(self.selected_index).map(|item| item.id.clone()),
        }
    }

    /// Selection described by `saved` in the current item list
    ///
    /// The saved id wins when it still names an item; otherwise the saved
    /// index is clamped.
    pub fn restore(saved: &SavedSelection, items: &NavItems) -> Self {
        let by_id = saved.id.as_deref().and_then(|id| items.index_of(id));
        match by_id {
            Some(selected_index) => Self { selected_index },
            None => Self::new(saved.index, items),
        }
    }
}

/// Persisted selection
///
/// Survives configuration changes and process death; the host chooses the
/// storage format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SavedSelection {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

fn clamp_logged(index: usize, items: &NavItems) -> usize {
    let clamped = items.clamp_index(index);
    if clamped != index {
        warn!(index, clamped, "selected index out of range, clamping");
    }
    clamped
}
