//! Trove Core Library
//!
//! This crate provides the core functionality for Trove, a catalog of
//! schema-free items: named records carrying an arbitrary bag of scalar
//! properties. Items come from a remote HTTP source, are cached in a
//! local JSON file, and are searched by property name fragment or exact
//! property value.
//!
//! # Architecture
//!
//! - **ItemStore**: single owner of the in-memory collection; absent (not
//!   empty) until the first successful load completes
//! - **SyncCoordinator**: runs the background refresh cycle (cache read,
//!   remote fetch, atomic replace, index rebuild) behind a single
//!   in-flight handle that callers join before touching the store
//!
//! # Quick Start
//!
//! ```text
//! let store = Arc::new(ItemStore::new());
//! let coordinator = SyncCoordinator::new(store.clone(), remote, cache);
//!
//! coordinator.start_refresh().await;
//! // ... accept a selection while the refresh runs ...
//! coordinator.join().await?;
//!
//! let matches = store.find_by_value("red").await?;
//! ```
//!
//! # Modules
//!
//! - `store`: authoritative item collection (main entry point)
//! - `models`: the item entity and its property values
//! - `index`: derived case-insensitive set of property names
//! - `search`: fragment and exact-value queries over a snapshot
//! - `sync`: background refresh coordination
//! - `remote`: the remote item source and its HTTP implementation
//! - `cache`: local file persistence
//! - `config`: application configuration
//! - `error`: error taxonomy

pub mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod remote;
pub mod search;
pub mod store;
pub mod sync;

pub use cache::{Cache, FileCache};
pub use config::Config;
pub use error::{TroveError, TroveResult};
pub use index::PropertyIndex;
pub use models::{Item, PropertyValue};
pub use remote::{HttpRemote, RemoteSource};
pub use search::ValueMatch;
pub use store::ItemStore;
pub use sync::{RefreshOutcome, RefreshStatus, SyncCoordinator};
