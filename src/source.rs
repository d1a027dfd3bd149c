//! Remote data source for ranked IDs and item details
//!
//! [`ItemSource`] is the seam between the fetch pipeline and the network. The
//! production implementation, [`HttpSource`], talks to the Hacker News Firebase
//! API; tests substitute scripted in-memory sources.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{Item, ItemId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Trait for the ranking and item detail endpoints
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetch the current top story IDs, best first
    ///
    /// # Errors
    ///
    /// Returns a transport-class error if the request fails or the server
    /// answers with a non-success status, and a decode error if the body is
    /// not a JSON array of integers.
    async fn top_story_ids(&self) -> Result<Vec<ItemId>>;

    /// Fetch the detail record for one item
    ///
    /// # Errors
    ///
    /// Same classes as [`top_story_ids`](ItemSource::top_story_ids); a body of
    /// `null` (unknown item) is a decode error.
    async fn item(&self, id: ItemId) -> Result<Item>;
}

/// [`ItemSource`] backed by the Hacker News HTTP API
#[derive(Clone, Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// Create a new HTTP source from the configuration
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| Error::Config {
            message: format!("failed to create HTTP client: {}", e),
            key: None,
        })?;

        Ok(Self::with_client(client, &config.api_base_url))
    }

    /// Create a source around an existing client
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn top_stories_url(&self) -> String {
        format!("{}/topstories.json", self.base_url)
    }

    fn item_url(&self, id: ItemId) -> String {
        format!("{}/item/{}.json", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.clone(),
                source,
            })?;

        // Check HTTP status before trying to parse the response body
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| Error::Transport {
            url: url.clone(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| Error::Decode { url, source })
    }
}

#[async_trait]
impl ItemSource for HttpSource {
    async fn top_story_ids(&self) -> Result<Vec<ItemId>> {
        self.get_json(self.top_stories_url()).await
    }

    async fn item(&self, id: ItemId) -> Result<Item> {
        debug!(id = id.get(), "requesting item");
        self.get_json(self.item_url(id)).await
    }
}
