//! Authoritative in-memory item collection
//!
//! Single owner of the item sequence. Before the first successful load
//! the collection is absent (not empty) and callers branch on that rather
//! than assume a populated store. A `replace` swaps the whole collection
//! under the write lock, so readers observe either the old snapshot or
//! the new one in its entirety, never a partial mix.

use tokio::sync::RwLock;

use crate::error::{TroveError, TroveResult};
use crate::models::{Item, PropertyValue};
use crate::search::{self, ValueMatch};

/// Owns the authoritative sequence of items
#[derive(Debug, Default)]
pub struct ItemStore {
    items: RwLock<Option<Vec<Item>>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, or `None` if no successful load has completed
    pub async fn get_all(&self) -> Option<Vec<Item>> {
        self.items.read().await.clone()
    }

    /// Whether a load has completed
    pub async fn is_loaded(&self) -> bool {
        self.items.read().await.is_some()
    }

    /// Number of items, or `None` before the first load
    pub async fn len(&self) -> Option<usize> {
        self.items.read().await.as_ref().map(Vec::len)
    }

    /// Atomically swap in a freshly loaded collection
    pub async fn replace(&self, items: Vec<Item>) {
        *self.items.write().await = Some(items);
    }

    /// Remove the first item whose id equals `id`, ignoring case.
    ///
    /// Returns whether an item was removed. Items without an id never
    /// match. Not-found is a normal outcome, not an error.
    pub async fn remove_by_id(&self, id: &str) -> bool {
        let mut guard = self.items.write().await;
        let Some(items) = guard.as_mut() else {
            return false;
        };

        let position = items.iter().position(|item| {
            item.id
                .as_deref()
                .map_or(false, |item_id| item_id.eq_ignore_ascii_case(id))
        });

        match position {
            Some(pos) => {
                items.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Append a newly created item.
    ///
    /// Only touches the in-memory collection; the caller triggers a
    /// refresh to persist. On a not-yet-loaded store this seeds a
    /// one-item collection so the creation is not dropped.
    pub async fn add(&self, item: Item) {
        let mut guard = self.items.write().await;
        guard.get_or_insert_with(Vec::new).push(item);
    }

    /// Values of properties whose name contains `fragment`.
    ///
    /// Errors with `NotLoaded` before the first successful load; an empty
    /// result is the only no-match signal afterwards.
    pub async fn values_by_name_fragment(
        &self,
        fragment: &str,
    ) -> TroveResult<Vec<Option<PropertyValue>>> {
        let guard = self.items.read().await;
        let items = guard.as_ref().ok_or(TroveError::NotLoaded)?;
        Ok(search::values_by_name_fragment(items, fragment))
    }

    /// Items with a non-null property whose value equals `target` as text
    pub async fn find_by_value(&self, target: &str) -> TroveResult<Vec<ValueMatch>> {
        let guard = self.items.read().await;
        let items = guard.as_ref().ok_or(TroveError::NotLoaded)?;
        Ok(search::find_by_value(items, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::PropertyIndex;

    fn item(id: Option<&str>, name: &str) -> Item {
        match id {
            Some(id) => Item::with_id(id, name),
            None => Item::new(name),
        }
    }

    #[tokio::test]
    async fn test_store_starts_absent() {
        let store = ItemStore::new();

        assert!(store.get_all().await.is_none());
        assert!(!store.is_loaded().await);
        assert!(store.len().await.is_none());
    }

    #[tokio::test]
    async fn test_search_before_load_is_not_loaded() {
        let store = ItemStore::new();

        assert!(matches!(
            store.values_by_name_fragment("color").await,
            Err(TroveError::NotLoaded)
        ));
        assert!(matches!(
            store.find_by_value("red").await,
            Err(TroveError::NotLoaded)
        ));
    }

    #[tokio::test]
    async fn test_replace_preserves_order() {
        let store = ItemStore::new();
        let items = vec![
            item(Some("1"), "B"),
            item(Some("2"), "A"),
            item(Some("3"), "C"),
        ];

        store.replace(items.clone()).await;

        assert_eq!(store.get_all().await.unwrap(), items);
        assert_eq!(store.len().await, Some(3));
    }

    #[tokio::test]
    async fn test_replace_leaves_no_residue() {
        let store = ItemStore::new();

        let mut old = item(Some("1"), "A");
        old.set_property("Color", "Red");
        store.replace(vec![old]).await;

        let mut new = item(Some("2"), "B");
        new.set_property("Weight", "10");
        store.replace(vec![new.clone()]).await;

        let snapshot = store.get_all().await.unwrap();
        assert_eq!(snapshot, vec![new]);

        let index = PropertyIndex::build(&snapshot);
        assert!(index.contains("Weight"));
        assert!(!index.contains("Color"));
    }

    #[tokio::test]
    async fn test_remove_by_id_on_empty_store() {
        let store = ItemStore::new();
        assert!(!store.remove_by_id("1").await);

        store.replace(Vec::new()).await;
        assert!(!store.remove_by_id("1").await);
        assert_eq!(store.len().await, Some(0));
    }

    #[tokio::test]
    async fn test_remove_by_id_non_matching_changes_nothing() {
        let store = ItemStore::new();
        let items = vec![item(Some("1"), "A"), item(Some("2"), "B")];
        store.replace(items.clone()).await;

        assert!(!store.remove_by_id("9").await);
        assert_eq!(store.get_all().await.unwrap(), items);
    }

    #[tokio::test]
    async fn test_remove_by_id_is_case_insensitive() {
        let store = ItemStore::new();
        store
            .replace(vec![item(Some("AbC-1"), "A"), item(Some("2"), "B")])
            .await;

        assert!(store.remove_by_id("abc-1").await);
        assert_eq!(store.len().await, Some(1));
        assert_eq!(store.get_all().await.unwrap()[0].name, "B");
    }

    #[tokio::test]
    async fn test_items_without_id_never_match() {
        let store = ItemStore::new();
        store.replace(vec![item(None, "Fresh")]).await;

        assert!(!store.remove_by_id("fresh").await);
        assert_eq!(store.len().await, Some(1));
    }

    #[tokio::test]
    async fn test_add_appends() {
        let store = ItemStore::new();
        store.replace(vec![item(Some("1"), "A")]).await;

        store.add(item(None, "Fresh")).await;

        let snapshot = store.get_all().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].name, "Fresh");
    }

    #[tokio::test]
    async fn test_add_seeds_unloaded_store() {
        let store = ItemStore::new();
        store.add(item(None, "Fresh")).await;

        assert!(store.is_loaded().await);
        assert_eq!(store.len().await, Some(1));
    }

    #[tokio::test]
    async fn test_search_through_store() {
        let store = ItemStore::new();
        let mut widget = item(Some("1"), "Widget");
        widget.set_property("Weight", "10");
        store.replace(vec![widget]).await;

        let matches = store.find_by_value("10").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item_name, "Widget");

        let values = store.values_by_name_fragment("eig").await.unwrap();
        assert_eq!(
            values,
            vec![Some(PropertyValue::Text("10".to_string()))]
        );
    }
}
