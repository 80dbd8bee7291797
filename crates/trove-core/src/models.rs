//! Data models for Trove
//!
//! Defines the core data entity: an `Item` carrying a dynamic, schema-free
//! bag of scalar properties. Property names are unique within one item
//! under case-insensitive comparison; the bag may be empty.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Case-insensitive string equality for user-facing text.
///
/// Ids are compared with `eq_ignore_ascii_case` instead; they are opaque
/// ASCII identifiers, not display text.
pub(crate) fn ci_eq(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// A scalar property value.
///
/// Upstream payloads are untyped JSON, so a value is text, a number, or an
/// explicit null. Null entries stay in the bag when the payload carries
/// them but are excluded from indexing and search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
    Null,
}

impl PropertyValue {
    /// Canonical text rendering used for comparison and display.
    ///
    /// Returns `None` for null values, which never participate in search.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            PropertyValue::Text(s) => Some(Cow::Borrowed(s)),
            PropertyValue::Number(n) => Some(Cow::Owned(n.to_string())),
            PropertyValue::Null => None,
        }
    }

    /// Whether this entry is excluded from indexing and search.
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Case-insensitive exact text equality against `target`.
    pub fn matches_text(&self, target: &str) -> bool {
        self.as_text().map_or(false, |text| ci_eq(&text, target))
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => write!(f, "{}", s),
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Number(n)
    }
}

/// A named record with a dynamic set of scalar properties
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Display name, not required unique across the collection
    pub name: String,
    /// Upstream identifier; absent for freshly created, not-yet-synced items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Property name to value
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Item {
    /// Create a new item with an empty property bag and no id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            properties: BTreeMap::new(),
        }
    }

    /// Create an item with an upstream id (for loading from a source)
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Some(id.into()),
            properties: BTreeMap::new(),
        }
    }

    /// Set a property, replacing any existing name that matches
    /// case-insensitively.
    ///
    /// When a match is replaced, the spelling already in the bag is kept.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        let name = name.into();
        let value = value.into();
        match self.property_key(&name) {
            Some(existing) => {
                self.properties.insert(existing, value);
            }
            None => {
                self.properties.insert(name, value);
            }
        }
    }

    /// Case-insensitive property lookup
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(key, _)| ci_eq(key, name))
            .map(|(_, value)| value)
    }

    /// The stored spelling of a property name, matched case-insensitively
    fn property_key(&self, name: &str) -> Option<String> {
        self.properties
            .keys()
            .find(|key| ci_eq(key, name))
            .cloned()
    }
}
