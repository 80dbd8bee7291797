//! Background refresh coordination
//!
//! One refresh cycle: load the persisted items, fetch the authoritative
//! collection from the remote, replace the store, rebuild and publish the
//! property index. At most one refresh is in flight at a time; foreground
//! handlers call `join` before touching the store, which is the single
//! ordering guarantee the system needs — there is exactly one writer
//! active at a time by construction.
//!
//! A failed cycle leaves the prior store contents and the published index
//! untouched; the error surfaces at the join point.

use std::sync::Arc;

use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::Cache;
use crate::error::{TroveError, TroveResult};
use crate::index::PropertyIndex;
use crate::remote::RemoteSource;
use crate::store::ItemStore;

/// Where the refresh cycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// No refresh running
    Idle,
    /// Reading the local cache
    Loading,
    /// Fetching from the remote source
    Fetching,
    /// Last refresh failed
    Error,
}

/// Result of a completed refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Items now in the store
    pub items: usize,
    /// Distinct property names in the rebuilt index
    pub properties: usize,
}

/// Owns the single in-flight refresh handle
pub struct SyncCoordinator {
    store: Arc<ItemStore>,
    remote: Arc<dyn RemoteSource>,
    cache: Arc<dyn Cache>,
    index: Arc<RwLock<Option<PropertyIndex>>>,
    status_tx: watch::Sender<RefreshStatus>,
    status_rx: watch::Receiver<RefreshStatus>,
    inflight: Mutex<Option<JoinHandle<TroveResult<RefreshOutcome>>>>,
}

impl SyncCoordinator {
    pub fn new(
        store: Arc<ItemStore>,
        remote: Arc<dyn RemoteSource>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        let (status_tx, status_rx) = watch::channel(RefreshStatus::Idle);
        Self {
            store,
            remote,
            cache,
            index: Arc::new(RwLock::new(None)),
            status_tx,
            status_rx,
            inflight: Mutex::new(None),
        }
    }

    /// Current refresh status
    pub fn status(&self) -> RefreshStatus {
        *self.status_rx.borrow()
    }

    /// Subscribe to status changes
    pub fn subscribe_status(&self) -> watch::Receiver<RefreshStatus> {
        self.status_rx.clone()
    }

    /// The last published index; `None` until a refresh has succeeded
    pub async fn property_index(&self) -> Option<PropertyIndex> {
        self.index.read().await.clone()
    }

    /// The published index, for operations that cannot run without one.
    ///
    /// Errors with `NoProperties` before the first successful refresh
    /// instead of handing callers a missing structure.
    pub async fn require_index(&self) -> TroveResult<PropertyIndex> {
        self.index
            .read()
            .await
            .clone()
            .ok_or(TroveError::NoProperties)
    }

    /// Start a background refresh unless one is already in flight.
    ///
    /// Returns whether a new cycle was started. A second start while one
    /// is outstanding is a no-op; callers join instead.
    pub async fn start_refresh(&self) -> bool {
        let mut inflight = self.inflight.lock().await;

        if let Some(handle) = inflight.as_ref() {
            if !handle.is_finished() {
                debug!("refresh already in flight, not starting another");
                return false;
            }
        }

        let store = Arc::clone(&self.store);
        let remote = Arc::clone(&self.remote);
        let cache = Arc::clone(&self.cache);
        let index = Arc::clone(&self.index);
        let status = self.status_tx.clone();

        *inflight = Some(tokio::spawn(async move {
            let result = run_cycle(&store, remote.as_ref(), cache.as_ref(), &index, &status).await;
            match &result {
                Ok(outcome) => {
                    let _ = status.send(RefreshStatus::Idle);
                    info!(
                        items = outcome.items,
                        properties = outcome.properties,
                        "refresh complete"
                    );
                }
                Err(e) => {
                    let _ = status.send(RefreshStatus::Error);
                    warn!("refresh failed: {}", e);
                }
            }
            result
        }));

        true
    }

    /// Wait for the in-flight refresh, if any, and return its outcome.
    ///
    /// This is the join point: a handler that calls this before reading or
    /// mutating the store never observes a half-finished replace. Returns
    /// `Ok(None)` when nothing was in flight.
    pub async fn join(&self) -> TroveResult<Option<RefreshOutcome>> {
        let handle = self.inflight.lock().await.take();
        let Some(handle) = handle else {
            return Ok(None);
        };

        match handle.await {
            Ok(result) => result.map(Some),
            Err(e) => Err(TroveError::RefreshFailed(e.to_string())),
        }
    }

    /// Start a refresh and wait for it - the create/delete follow-up
    pub async fn refresh_and_join(&self) -> TroveResult<Option<RefreshOutcome>> {
        self.start_refresh().await;
        self.join().await
    }
}

/// One full refresh cycle
async fn run_cycle(
    store: &ItemStore,
    remote: &dyn RemoteSource,
    cache: &dyn Cache,
    index: &RwLock<Option<PropertyIndex>>,
    status: &watch::Sender<RefreshStatus>,
) -> TroveResult<RefreshOutcome> {
    let _ = status.send(RefreshStatus::Loading);
    let cached = cache.load_all().await?;
    debug!(items = cached.len(), "cache loaded");

    let _ = status.send(RefreshStatus::Fetching);
    let fetched = remote.fetch_all().await?;

    let rebuilt = PropertyIndex::build(&fetched);
    let outcome = RefreshOutcome {
        items: fetched.len(),
        properties: rebuilt.len(),
    };

    store.replace(fetched.clone()).await;
    *index.write().await = Some(rebuilt);

    // The replace already happened; a write-back failure must not undo it
    if let Err(e) = cache.save_all(&fetched).await {
        warn!("cache write-back failed: {}", e);
    }

    Ok(outcome)
}
