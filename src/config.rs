//! Configuration types for hn-hot

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// What the fetcher does when a single item fails to fetch or decode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Any failure aborts the whole batch and no result set is returned (default)
    #[default]
    Abort,
    /// Failures are recorded in their slot and the rest of the batch still runs
    Partial,
}

/// Main configuration for a top-stories fetch
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the ranking/item API (default: "https://hacker-news.firebaseio.com/v0")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the discussion page; the item ID is appended as `?id=<id>`
    #[serde(default = "default_discussion_base_url")]
    pub discussion_base_url: String,

    /// Number of top stories to fetch (default: 30)
    #[serde(default = "default_num_stories")]
    pub num_stories: usize,

    /// Maximum in-flight item fetches (None = number of available CPUs)
    #[serde(default)]
    pub concurrency: Option<usize>,

    /// Behavior when an individual item fetch fails
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Per-request timeout (None = wait indefinitely)
    #[serde(default, with = "optional_duration_serde")]
    pub request_timeout: Option<Duration>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            discussion_base_url: default_discussion_base_url(),
            num_stories: default_num_stories(),
            concurrency: None,
            failure_policy: FailurePolicy::default(),
            request_timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Effective number of concurrent item fetches
    ///
    /// Falls back to the number of available processing units, and to 1 if that
    /// cannot be determined.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Check the configuration for values the fetcher cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.num_stories == 0 {
            return Err(Error::config("must be at least 1", "num_stories"));
        }
        if self.concurrency == Some(0) {
            return Err(Error::config("must be at least 1", "concurrency"));
        }
        validate_base_url(&self.api_base_url, "api_base_url")?;
        validate_base_url(&self.discussion_base_url, "discussion_base_url")?;
        Ok(())
    }
}

fn validate_base_url(value: &str, key: &str) -> Result<()> {
    let parsed =
        Url::parse(value).map_err(|e| Error::config(format!("invalid URL {value:?}: {e}"), key))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::config(
            format!("unsupported URL scheme {other:?} in {value:?}"),
            key,
        )),
    }
}

fn default_api_base_url() -> String {
    "https://hacker-news.firebaseio.com/v0".to_string()
}

fn default_discussion_base_url() -> String {
    "https://news.ycombinator.com/item".to_string()
}

fn default_num_stories() -> usize {
    30
}

fn default_user_agent() -> String {
    format!("hn-hot/{}", env!("CARGO_PKG_VERSION"))
}

// Optional Duration serialization helper (whole seconds)
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
