//! One-shot top-stories pipeline: list, fetch, render

use crate::alfred::{self, AlfredOutput};
use crate::config::Config;
use crate::error::Result;
use crate::fetcher::{BoundedFetcher, list_ranked};
use crate::source::{HttpSource, ItemSource};
use crate::types::ResultSet;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Runs a single top-stories batch against an [`ItemSource`]
pub struct HotFetcher {
    source: Arc<dyn ItemSource>,
    fetcher: BoundedFetcher,
    config: Config,
}

impl HotFetcher {
    /// Create a fetcher talking to the configured HTTP API
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client cannot be created
    pub fn new(config: Config) -> Result<Self> {
        let source = Arc::new(HttpSource::new(&config)?);
        Self::with_source(source, config)
    }

    /// Create a fetcher around any source
    ///
    /// # Errors
    /// Returns error if the configuration is invalid
    pub fn with_source(source: Arc<dyn ItemSource>, config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = BoundedFetcher::new(Arc::clone(&source), &config);
        Ok(Self {
            source,
            fetcher,
            config,
        })
    }

    /// List the ranking and fetch the top `num_stories` items
    pub async fn fetch_top(&self) -> Result<ResultSet> {
        let ranked = list_ranked(self.source.as_ref()).await?;
        self.fetcher.fetch(&ranked).await
    }

    /// Fetch and render the script filter output using the current time
    pub async fn run(&self) -> Result<AlfredOutput> {
        self.run_at(Utc::now()).await
    }

    /// Fetch and render, computing story ages relative to `now`
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<AlfredOutput> {
        let results = self.fetch_top().await?;
        let output = alfred::render(&results, &self.config.discussion_base_url, now)?;
        info!(rows = output.items.len(), "rendered output");
        Ok(output)
    }
}
