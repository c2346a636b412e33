//! Navigation items
//!
//! The host supplies an ordered list of [`NavItem`]s. Order defines slot order;
//! ids must be unique and stable across item-list replacements so the selection
//! can follow an item when the list changes.

use indexmap::IndexMap;

use crate::error::{NavBarError, Result};

/// Opaque host-side icon handle
///
/// The bar never renders icons itself; it only tells the host which item's
/// icon sits in the floating indicator and how opaque each bar icon is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IconRef(pub String);

impl IconRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A navigable destination shown as one slot of the bar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub icon: IconRef,
}

impl NavItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: IconRef::new(icon),
        }
    }
}

/// Ordered, id-keyed, non-empty list of items
#[derive(Clone, Debug, PartialEq)]
pub struct NavItems {
    items: IndexMap<String, NavItem>,
}

impl NavItems {
    /// Build the list, rejecting empty input and duplicate ids
    pub fn new(items: impl IntoIterator<Item = NavItem>) -> Result<Self> {
        let mut map = IndexMap::new();
        for item in items {
            if map.contains_key(&item.id) {
                return Err(NavBarError::DuplicateItem(item.id));
            }
            map.insert(item.id.clone(), item);
        }
        if map.is_empty() {
            return Err(NavBarError::NoItems);
        }
        Ok(Self { items: map })
    }

    /// Number of items; never zero
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item in slot `index`
    pub fn get(&self, index: usize) -> Option<&NavItem> {
        self.items.get_index(index).map(|(_, item)| item)
    }

    /// Slot index of the item with `id`
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.get_index_of(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavItem> {
        self.items.values()
    }

    /// Clamp `index` into `[0, len)`
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.len() - 1)
    }
}
