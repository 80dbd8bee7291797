//! Read-only queries over an item snapshot
//!
//! Both queries are case-insensitive and return a possibly empty vector;
//! empty is the only no-match signal. The fragment query matches property
//! names by substring, the value query matches property values by exact
//! text equality. Results follow store iteration order, then the item's
//! own property order; no additional sorting.

use crate::models::{Item, PropertyValue};

/// A property whose value matched a search target
#[derive(Debug, Clone, PartialEq)]
pub struct ValueMatch {
    pub item_name: String,
    pub item_id: Option<String>,
    pub property: String,
    pub value: PropertyValue,
}

/// Collect the values of every property whose name contains `fragment` as
/// a case-insensitive substring.
///
/// One entry per matching property. An item with no matching non-null
/// property contributes a single `None` so callers can tell which items
/// lack the property entirely. Null-valued properties count as missing.
pub fn values_by_name_fragment(items: &[Item], fragment: &str) -> Vec<Option<PropertyValue>> {
    let fragment = fragment.to_lowercase();
    let mut values = Vec::new();

    for item in items {
        let mut matched = false;
        for (name, value) in &item.properties {
            if value.is_null() {
                continue;
            }
            if name.to_lowercase().contains(&fragment) {
                values.push(Some(value.clone()));
                matched = true;
            }
        }
        if !matched {
            values.push(None);
        }
    }

    values
}

/// Find every non-null property whose value equals `target`, compared as
/// text, case-insensitively.
///
/// Exact equality, not substring - deliberately different from the
/// name-fragment query.
pub fn find_by_value(items: &[Item], target: &str) -> Vec<ValueMatch> {
    let mut matches = Vec::new();

    for item in items {
        for (name, value) in &item.properties {
            if value.matches_text(target) {
                matches.push(ValueMatch {
                    item_name: item.name.clone(),
                    item_id: item.id.clone(),
                    property: name.clone(),
                    value: value.clone(),
                });
            }
        }
    }

    matches
}
