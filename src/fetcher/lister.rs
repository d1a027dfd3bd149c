//! Ranked-ID listing

use crate::error::Result;
use crate::source::ItemSource;
use crate::types::RankedId;
use tracing::{debug, info};

/// Fetch the current ranking and attach each ID's position as its rank
///
/// The order is exactly the source order; nothing is filtered, deduplicated or
/// cached. A single failed request fails the whole listing.
pub async fn list_ranked(source: &dyn ItemSource) -> Result<Vec<RankedId>> {
    info!("fetching top stories");
    let ids = source.top_story_ids().await?;
    debug!(count = ids.len(), "received ranked ids");

    Ok(ids
        .into_iter()
        .enumerate()
        .map(|(rank, id)| RankedId { rank, id })
        .collect())
}
