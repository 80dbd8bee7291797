//! Remote item source
//!
//! The authoritative collection lives behind an HTTP API with a fixed
//! resource layout: `/items` for the whole collection, `/items/{id}` for
//! one item. Transport details stay in this module; the rest of the crate
//! sees only the `RemoteSource` trait.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::{TroveError, TroveResult};
use crate::models::Item;

/// Where items come from
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the authoritative item collection
    async fn fetch_all(&self) -> TroveResult<Vec<Item>>;

    /// Push a newly created item; returns the stored item with its
    /// upstream-assigned id
    async fn create(&self, item: &Item) -> TroveResult<Item>;

    /// Delete an item by id. `false` when the remote has no such item.
    async fn delete(&self, id: &str) -> TroveResult<bool>;
}

/// HTTP implementation of `RemoteSource`
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    /// Build a client for `base_url` with the given request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> TroveResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("trove/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn items_url(&self) -> String {
        format!("{}/items", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/items/{}", self.base_url, id)
    }
}

#[async_trait]
impl RemoteSource for HttpRemote {
    async fn fetch_all(&self) -> TroveResult<Vec<Item>> {
        let url = self.items_url();
        debug!(%url, "fetching item collection");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let items: Vec<Item> = response.json().await.map_err(decode_error)?;

        debug!(items = items.len(), "fetched item collection");
        Ok(items)
    }

    async fn create(&self, item: &Item) -> TroveResult<Item> {
        let url = self.items_url();
        debug!(%url, name = %item.name, "creating item");

        let response = self
            .client
            .post(&url)
            .json(item)
            .send()
            .await?
            .error_for_status()?;

        let stored: Item = response.json().await.map_err(decode_error)?;
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> TroveResult<bool> {
        let url = self.item_url(id);
        debug!(%url, "deleting item");

        let response = self.client.delete(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        response.error_for_status()?;
        Ok(true)
    }
}

/// Map a body-decoding failure to the payload error; everything else
/// stays a transport error.
fn decode_error(e: reqwest::Error) -> TroveError {
    if e.is_decode() {
        TroveError::MalformedPayload {
            details: e.to_string(),
        }
    } else {
        TroveError::Remote(e)
    }
}
