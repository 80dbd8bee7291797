//! Derived property-name index
//!
//! The index is the set of distinct property names across the whole
//! collection, case-insensitive. It is rebuilt synchronously after every
//! full reload and may be briefly stale between a mutation and the next
//! rebuild; callers tolerate that window.

use std::collections::BTreeMap;

use crate::models::Item;

/// Set of distinct property names, case-insensitive.
///
/// Keyed by the lowercased name; the stored value is the spelling seen
/// first, which is what callers display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyIndex {
    names: BTreeMap<String, String>,
}

impl PropertyIndex {
    /// Build the index from the current collection.
    ///
    /// Null-valued properties contribute nothing. Deterministic given the
    /// same collection.
    pub fn build(items: &[Item]) -> Self {
        let mut names = BTreeMap::new();
        for item in items {
            for (name, value) in &item.properties {
                if value.is_null() {
                    continue;
                }
                names
                    .entry(name.to_lowercase())
                    .or_insert_with(|| name.clone());
            }
        }
        Self { names }
    }

    /// Case-insensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&name.to_lowercase())
    }

    /// Property names in lowercase-sorted order, original spelling
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
