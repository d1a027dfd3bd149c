//! Core types for hn-hot

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identifier of a Hacker News item
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ItemId {
    /// Create a new ItemId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl PartialEq<i64> for ItemId {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item ID together with its 0-based position in the ranking
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankedId {
    /// Position in the source ranking (0 = top)
    pub rank: usize,
    /// Item identifier
    pub id: ItemId,
}

/// Detail record of a single story
///
/// Only `id` is required; every other field defaults when the API omits it
/// (text posts have no `url`, deleted items have no `by`, fresh stories no `kids`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item identifier
    pub id: ItemId,
    /// Author username
    #[serde(default)]
    pub by: String,
    /// Story title
    #[serde(default)]
    pub title: String,
    /// Destination URL (empty for text posts)
    #[serde(default)]
    pub url: String,
    /// Story score
    #[serde(default)]
    pub score: i64,
    /// Creation time, unix seconds
    #[serde(default)]
    pub time: i64,
    /// Direct child comment IDs, in ranked display order
    #[serde(default)]
    pub kids: Vec<ItemId>,
}

/// State of one result slot
#[derive(Debug, Default)]
pub enum Slot {
    /// No ranked ID was available for this position
    #[default]
    Empty,
    /// The item was fetched and decoded
    Filled(Item),
    /// Fetching this item failed (only recorded under [`FailurePolicy::Partial`](crate::config::FailurePolicy::Partial))
    Failed {
        /// ID that was being fetched
        id: ItemId,
        /// Why the fetch failed
        error: Error,
    },
}

impl Slot {
    /// The fetched item, if this slot is filled
    pub fn item(&self) -> Option<&Item> {
        match self {
            Slot::Filled(item) => Some(item),
            _ => None,
        }
    }

    /// Whether this slot holds a fetched item
    pub fn is_filled(&self) -> bool {
        matches!(self, Slot::Filled(_))
    }

    /// Whether this slot's fetch failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Slot::Failed { .. })
    }
}

/// Fixed-size result of a batch fetch, indexed by rank
#[derive(Debug)]
pub struct ResultSet {
    slots: Vec<Slot>,
}

impl ResultSet {
    /// Create a result set of `len` empty slots
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(Slot::default).take(len).collect(),
        }
    }

    /// Number of slots (always the configured batch size)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the set has no slots at all
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot for the given rank
    pub fn slot(&self, rank: usize) -> Option<&Slot> {
        self.slots.get(rank)
    }

    /// All slots in rank order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Fetched items in rank order, skipping empty and failed slots
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter().filter_map(Slot::item)
    }

    /// Ranks whose fetch failed
    pub fn failed_ranks(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_failed())
            .map(|(rank, _)| rank)
            .collect()
    }

    /// Whether every slot holds a fetched item
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Slot::is_filled)
    }

    /// Store a slot at `rank`, which must be within the set
    pub(crate) fn set(&mut self, rank: usize, slot: Slot) {
        debug_assert!(rank < self.slots.len(), "rank {rank} outside result set");
        if let Some(target) = self.slots.get_mut(rank) {
            *target = slot;
        }
    }

    /// Consume the set, returning its slots
    pub fn into_slots(self) -> Vec<Slot> {
        self.slots
    }
}
