//! Test fixtures and factory functions for request bodies.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde_json::json;

/// A self-rated attempt (flashcards, story, match_words).
pub fn rated(word_id: i64, rating: i64) -> serde_json::Value {
    json!({ "word_id": word_id, "rating": rating })
}

/// A typed attempt (write_words).
pub fn typed(word_id: i64, typed_word: &str) -> serde_json::Value {
    json!({ "word_id": word_id, "typed_word": typed_word })
}

/// Create a review request body with a single game group.
pub fn review_request(game: &str, attempts: Vec<serde_json::Value>) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert(game.to_string(), serde_json::Value::Array(attempts));
    serde_json::Value::Object(body)
}

/// Generate a unique name to avoid collisions between test runs.
pub fn unique_name(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    format!(
        "{}_{}_{}",
        prefix,
        Utc::now().timestamp_nanos_opt().unwrap_or_default(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}
