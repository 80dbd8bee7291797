//! Local item cache
//!
//! Items fetched from the remote source are cached in a JSON file. The
//! cache collaborator keeps its own copy of whatever it last loaded; the
//! sync coordinator decides what ends up in the item store.
//!
//! Uses atomic writes (write to temp file, then rename) so the cache file
//! is never left in a partially-written state. A missing file is "no
//! items"; a present-but-undecodable file is a hard error.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{TroveError, TroveResult};
use crate::models::Item;

/// On-disk cache envelope
#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    saved_at: DateTime<Utc>,
    items: Vec<Item>,
}

/// Local persistence for the item collection
#[async_trait]
pub trait Cache: Send + Sync {
    /// Load the persisted items into this collaborator's own store and
    /// return them. A missing cache is "no items", not an error.
    async fn load_all(&self) -> TroveResult<Vec<Item>>;

    /// Persist a freshly fetched collection
    async fn save_all(&self, items: &[Item]) -> TroveResult<()>;
}

/// File-backed cache using a JSON envelope
#[derive(Debug)]
pub struct FileCache {
    path: PathBuf,
    /// Contents of the last successful load, kept for callers that want
    /// the persisted view without touching disk again
    loaded: RwLock<Option<Vec<Item>>>,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The items from the last successful `load_all`, if any
    pub async fn loaded(&self) -> Option<Vec<Item>> {
        self.loaded.read().await.clone()
    }
}

#[async_trait]
impl Cache for FileCache {
    async fn load_all(&self) -> TroveResult<Vec<Item>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no cache file, starting empty");
            *self.loaded.write().await = Some(Vec::new());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| TroveError::CacheRead {
            path: self.path.clone(),
            source,
        })?;

        let envelope: CacheFile =
            serde_json::from_str(&content).map_err(|e| TroveError::CorruptCache {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        debug!(
            items = envelope.items.len(),
            saved_at = %envelope.saved_at,
            "loaded item cache"
        );

        *self.loaded.write().await = Some(envelope.items.clone());
        Ok(envelope.items)
    }

    async fn save_all(&self, items: &[Item]) -> TroveResult<()> {
        let envelope = CacheFile {
            saved_at: Utc::now(),
            items: items.to_vec(),
        };

        let json = serde_json::to_vec_pretty(&envelope).map_err(|e| TroveError::CacheWrite {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;

        atomic_write(&self.path, &json)?;

        debug!(items = items.len(), path = %self.path.display(), "saved item cache");
        *self.loaded.write().await = Some(items.to_vec());
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> TroveResult<()> {
    let write_err = |source| TroveError::CacheWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path).map_err(write_err)?;
    file.write_all(data).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;

    fs::rename(&temp_path, path).map_err(write_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn widget() -> Item {
        let mut item = Item::with_id("1", "Widget");
        item.set_property("Weight", "10");
        item
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path().join("items.json"));

        let items = cache.load_all().await.unwrap();
        assert!(items.is_empty());
        assert_eq!(cache.loaded().await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path().join("items.json"));

        let items = vec![widget(), Item::with_id("2", "Gadget")];
        cache.save_all(&items).await.unwrap();

        let loaded = cache.load_all().await.unwrap();
        assert_eq!(loaded, items);
    }

    #[tokio::test]
    async fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path().join("nested").join("items.json"));

        cache.save_all(&[widget()]).await.unwrap();
        assert!(cache.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        fs::write(&path, "not json at all {").unwrap();

        let cache = FileCache::new(&path);
        let err = cache.load_all().await.unwrap_err();
        assert!(matches!(err, TroveError::CorruptCache { .. }));
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        let cache = FileCache::new(&path);

        cache.save_all(&[widget()]).await.unwrap();
        cache.save_all(&[widget(), Item::with_id("2", "Gadget")]).await.unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let loaded = cache.load_all().await.unwrap();
        assert_eq!(loaded.len(), 2);
    }
}
