//! Alfred script filter output
//!
//! Renders fetched stories into the JSON document an Alfred workflow reads from
//! stdout: one entry per story, opening the story URL by default and the
//! discussion page with the alt modifier.

use crate::error::{Error, Result};
use crate::types::{Item, ItemId, ResultSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Top-level script filter document
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlfredOutput {
    /// Result rows, in display order
    pub items: Vec<AlfredItem>,
}

impl AlfredOutput {
    /// Encode as a single-line JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One result row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlfredItem {
    /// Main line
    pub title: String,
    /// Second line
    pub subtitle: String,
    /// Value passed to the workflow when the row is actioned
    pub arg: String,
    /// Whether the row can be actioned
    pub valid: bool,
    /// Modifier key overrides
    pub mods: ModSection,
}

/// Modifier key overrides for a row
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModSection {
    /// Behavior while holding ⌥; serialized as `null` when absent
    pub alt: Option<ItemMod>,
    /// Behavior while holding ⌘; omitted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<ItemMod>,
}

/// Override applied while a modifier key is held
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMod {
    /// Whether the row can be actioned with this modifier
    pub valid: bool,
    /// Replacement argument
    pub arg: String,
    /// Replacement subtitle
    pub subtitle: String,
}

/// Render every filled slot, in rank order, as of `now`
///
/// Empty and failed slots are skipped rather than emitted as blank rows.
pub fn render(
    results: &ResultSet,
    discussion_base_url: &str,
    now: DateTime<Utc>,
) -> Result<AlfredOutput> {
    let items = results
        .items()
        .map(|item| render_item(item, discussion_base_url, now))
        .collect::<Result<Vec<_>>>()?;
    Ok(AlfredOutput { items })
}

/// Render a single story
pub fn render_item(
    item: &Item,
    discussion_base_url: &str,
    now: DateTime<Utc>,
) -> Result<AlfredItem> {
    let discussion = discussion_url(discussion_base_url, item.id)?;
    let arg = if item.url.is_empty() {
        discussion.clone()
    } else {
        item.url.clone()
    };

    Ok(AlfredItem {
        title: item.title.clone(),
        subtitle: subtitle(item, now),
        arg,
        valid: true,
        mods: ModSection {
            alt: Some(ItemMod {
                valid: true,
                arg: discussion,
                subtitle: "open comments".to_string(),
            }),
            cmd: None,
        },
    })
}

/// `"<score> points by <author> <age> | <comments>"`
pub fn subtitle(item: &Item, now: DateTime<Utc>) -> String {
    format!(
        "{} points by {} {} | {}",
        item.score,
        item.by,
        time_ago(item.time, now),
        comment_count(item.kids.len())
    )
}

/// Discussion page URL for an item, e.g. `https://news.ycombinator.com/item?id=8863`
pub fn discussion_url(base: &str, id: ItemId) -> Result<String> {
    let url = Url::parse_with_params(base, &[("id", id.to_string())])
        .map_err(|e| Error::config(format!("invalid URL {base:?}: {e}"), "discussion_base_url"))?;
    Ok(url.into())
}

/// Age of a unix timestamp relative to `now`
pub fn time_ago(created: i64, now: DateTime<Utc>) -> String {
    format_age(now.timestamp().saturating_sub(created))
}

/// Format an age in seconds
///
/// Units are truncated: under an hour counts minutes, under a day counts
/// hours, otherwise days. Only the day unit has a singular form, so exactly
/// one hour reads "1 hours ago". Timestamps in the future count as zero.
pub fn format_age(delta_secs: i64) -> String {
    let age = delta_secs.max(0);
    if age < SECS_PER_HOUR {
        format!("{} minutes ago", age / SECS_PER_MINUTE)
    } else if age < SECS_PER_DAY {
        format!("{} hours ago", age / SECS_PER_HOUR)
    } else {
        match age / SECS_PER_DAY {
            1 => "1 day ago".to_string(),
            days => format!("{} days ago", days),
        }
    }
}

/// `"1 comment"` or `"<n> comments"`
pub fn comment_count(kids: usize) -> String {
    if kids == 1 {
        "1 comment".to_string()
    } else {
        format!("{} comments", kids)
    }
}
