//! Error taxonomy
//!
//! Expected data-absence conditions (nothing loaded yet, nothing found)
//! surface as options and booleans at the call sites. The variants here
//! cover conditions that must stop an operation, with enough context for
//! the CLI layer to build a user-facing message.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from store, cache, remote, and refresh operations
#[derive(Error, Debug)]
pub enum TroveError {
    /// No successful load has completed yet
    #[error("item collection has not been loaded yet")]
    NotLoaded,

    /// Index or search requested before any successful refresh
    #[error("no properties available yet; run a refresh first")]
    NoProperties,

    /// Failed to read the cache file
    #[error("failed to read cache file '{path}': {source}")]
    CacheRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write the cache file
    #[error("failed to write cache file '{path}': {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Cache file exists but cannot be decoded
    #[error("cache file '{path}' is corrupt: {details}")]
    CorruptCache { path: PathBuf, details: String },

    /// Transport-level failure talking to the remote source
    #[error("remote request failed: {0}")]
    Remote(#[from] reqwest::Error),

    /// Remote responded but the payload could not be decoded
    #[error("remote payload could not be decoded: {details}")]
    MalformedPayload { details: String },

    /// No remote source configured
    #[error("no remote source configured; set remote_url in the config")]
    RemoteNotConfigured,

    /// A background refresh task stopped abnormally
    #[error("refresh failed: {0}")]
    RefreshFailed(String),
}

/// Result type for trove operations
pub type TroveResult<T> = Result<T, TroveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_errors_carry_path() {
        let err = TroveError::CacheRead {
            path: PathBuf::from("/data/items.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        let msg = err.to_string();
        assert!(msg.contains("/data/items.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_corrupt_cache_display() {
        let err = TroveError::CorruptCache {
            path: PathBuf::from("/data/items.json"),
            details: "expected value at line 1".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("corrupt"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn test_not_loaded_is_distinguishable() {
        let err = TroveError::NotLoaded;
        assert!(matches!(err, TroveError::NotLoaded));
        assert!(err.to_string().contains("not been loaded"));
    }
}
