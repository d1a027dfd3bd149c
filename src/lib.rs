//! # hn-hot
//!
//! Fetches the current Hacker News top stories and renders them as an Alfred
//! script filter document.
//!
//! One run performs one batch:
//! 1. list the ranked top story IDs
//! 2. fetch the details of the first N of them with a bounded pool of workers
//! 3. render the fetched stories, in rank order, as JSON
//!
//! ## Quick Start
//!
//! ```no_run
//! use hn_hot::{Config, HotFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         num_stories: 10,
//!         ..Default::default()
//!     };
//!
//!     let fetcher = HotFetcher::new(config)?;
//!     let output = fetcher.run().await?;
//!     println!("{}", output.to_json()?);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Alfred script filter output
pub mod alfred;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Ranked-ID listing and bounded concurrent item fetching
pub mod fetcher;
/// List, fetch and render in one call
pub mod pipeline;
/// Ranking and item detail sources
pub mod source;
/// Core types
pub mod types;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use alfred::AlfredOutput;
pub use config::{Config, FailurePolicy};
pub use error::{Error, Result};
pub use fetcher::{BoundedFetcher, list_ranked};
pub use pipeline::HotFetcher;
pub use source::{HttpSource, ItemSource};
pub use types::{Item, ItemId, RankedId, ResultSet, Slot};
