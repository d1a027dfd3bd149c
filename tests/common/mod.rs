//! Common test utilities for hn-hot integration tests

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fixed story creation time used by every mocked item
pub const STORY_TIME: i64 = 1_700_000_000;

/// Mount the ranking endpoint
pub async fn mount_top_stories(server: &MockServer, ids: &[i64]) {
    Mock::given(method("GET"))
        .and(path("/topstories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(ids)))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount one item detail endpoint, answering after `delay`
pub async fn mount_item(server: &MockServer, id: i64, score: i64, kids: &[i64], delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/item/{id}.json")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "by": format!("user{id}"),
                    "id": id,
                    "kids": kids,
                    "score": score,
                    "time": STORY_TIME,
                    "title": format!("Story {id}"),
                    "type": "story",
                    "url": format!("https://example.com/{id}"),
                }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Mount an item endpoint that fails with the given status
pub async fn mount_failing_item(server: &MockServer, id: i64, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/item/{id}.json")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
