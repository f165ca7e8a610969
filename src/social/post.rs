use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A message published by a user. `created_at` is in unix milliseconds and is
/// the ordering key of every feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    text: String,
    created_at: u64,
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

impl Post {
    pub fn new(text: impl Into<String>) -> Self {
        Self::at(text, now_millis())
    }

    pub fn at(text: impl Into<String>, created_at: u64) -> Self {
        Self {
            text: text.into(),
            created_at,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn is_after(&self, other: &Post) -> bool {
        self.created_at > other.created_at
    }

    pub fn is_before(&self, other: &Post) -> bool {
        self.created_at < other.created_at
    }
}

/// Ordering key handed to the feed fusion.
pub fn post_date(post: &&Post) -> u64 {
    post.created_at
}
