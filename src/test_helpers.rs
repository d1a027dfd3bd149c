//! Scripted in-memory [`ItemSource`] for unit tests.

use crate::error::{Error, Result};
use crate::source::ItemSource;
use crate::types::{Item, ItemId};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Default simulated round trip, long enough for fetches to overlap
const DEFAULT_DELAY: Duration = Duration::from_millis(20);

/// Test double for the ranking/detail API.
///
/// Every item call sleeps for its scripted delay while counted as in flight, so
/// tests can observe the peak number of concurrent detail fetches.
pub(crate) struct ScriptedSource {
    ids: Vec<ItemId>,
    fail_listing: bool,
    failing: HashSet<i64>,
    panicking: HashSet<i64>,
    delays: HashMap<i64, Duration>,
    scores: HashMap<i64, i64>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<Vec<ItemId>>,
}

impl ScriptedSource {
    pub(crate) fn new(ids: Vec<i64>) -> Self {
        Self {
            ids: ids.into_iter().map(ItemId).collect(),
            fail_listing: false,
            failing: HashSet::new(),
            panicking: HashSet::new(),
            delays: HashMap::new(),
            scores: HashMap::new(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn fail_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub(crate) fn fail_item(mut self, id: i64) -> Self {
        self.failing.insert(id);
        self
    }

    pub(crate) fn panic_on_item(mut self, id: i64) -> Self {
        self.panicking.insert(id);
        self
    }

    pub(crate) fn delay_item(mut self, id: i64, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    pub(crate) fn score_item(mut self, id: i64, score: i64) -> Self {
        self.scores.insert(id, score);
        self
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self) -> Vec<ItemId> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItemSource for ScriptedSource {
    async fn top_story_ids(&self) -> Result<Vec<ItemId>> {
        if self.fail_listing {
            return Err(Error::HttpStatus {
                url: "scripted://topstories.json".into(),
                status: 500,
            });
        }
        Ok(self.ids.clone())
    }

    async fn item(&self, id: ItemId) -> Result<Item> {
        self.calls.lock().unwrap().push(id);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.get(&id.get()).copied().unwrap_or(DEFAULT_DELAY);
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panicking.contains(&id.get()) {
            panic!("scripted panic for item {id}");
        }
        if self.failing.contains(&id.get()) {
            return Err(Error::HttpStatus {
                url: format!("scripted://item/{id}.json"),
                status: 500,
            });
        }

        Ok(Item {
            id,
            by: format!("user{id}"),
            title: format!("Story {id}"),
            url: format!("https://example.com/{id}"),
            score: self.scores.get(&id.get()).copied().unwrap_or(1),
            time: 1_700_000_000,
            kids: Vec::new(),
        })
    }
}
