use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{deserialize_nullable_string, deserialize_timestamp, Post};
use crate::error::ValidationError;

/// Strongly typed, always-positive thread identifier.
///
/// This is the form a thread id takes once it has crossed the navigation
/// boundary. The raw `u32` on [`Thread`] keeps `0` as the "unloaded"
/// sentinel; a `ThreadId` can never be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct ThreadId(u32);

impl ThreadId {
    /// Validate a raw id coming from a route or user input.
    pub fn new(raw: i64) -> Result<Self, ValidationError> {
        if raw <= 0 || raw > i64::from(u32::MAX) {
            return Err(ValidationError::InvalidThreadId(raw));
        }
        Ok(Self(raw as u32))
    }

    /// Build from a known non-zero constant. Panics at compile time when
    /// used in a const context with zero.
    pub(crate) const fn from_raw(raw: u32) -> Self {
        assert!(raw != 0, "thread id must be non-zero");
        Self(raw)
    }

    /// The raw numeric id.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for ThreadId {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ThreadId> for u32 {
    fn from(id: ThreadId) -> Self {
        id.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ThreadId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let raw: i64 = trimmed
            .parse()
            .map_err(|_| ValidationError::MalformedThreadId(trimmed.to_string()))?;
        Self::new(raw)
    }
}

/// A forum thread as returned by the API
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Thread {
    /// External thread id. `0` means no thread has been loaded.
    #[serde(default)]
    pub thread_id: u32,
    /// Thread title
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub title: String,
    /// Number of replies (excludes the first post)
    #[serde(default)]
    pub reply_count: u32,
    /// Number of views
    #[serde(default)]
    pub view_count: u32,
    /// Name of the thread starter
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub username: String,
    /// Forum node the thread lives in
    #[serde(default)]
    pub node_id: u32,
    /// Id of the opening post
    #[serde(default)]
    pub first_post_id: u32,
    /// When the thread was started (API sends unix seconds)
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub post_date: Option<DateTime<Utc>>,
    /// When the thread last received a post
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub last_post_date: Option<DateTime<Utc>>,
    /// Whether new replies are accepted
    #[serde(default = "default_true")]
    pub discussion_open: bool,
}

fn default_true() -> bool {
    true
}

impl Thread {
    /// True once a thread has been loaded from the server.
    pub fn is_loaded(&self) -> bool {
        self.thread_id != 0
    }

    /// The typed id, or `None` for the unloaded sentinel.
    pub fn id(&self) -> Option<ThreadId> {
        ThreadId::new(i64::from(self.thread_id)).ok()
    }
}

/// Server-side pagination metadata for a thread page
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page the response covers
    #[serde(default)]
    pub current_page: u32,
    /// Last available page
    #[serde(default)]
    pub last_page: u32,
    /// Posts per page
    #[serde(default)]
    pub per_page: u32,
    /// Total posts in the thread
    #[serde(default)]
    pub total: u32,
}

/// One fetch worth of thread content: the thread plus one page of posts.
///
/// Posts always belong to `thread.thread_id`; a default value (thread id
/// `0`, no posts) represents the unloaded state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ThreadInfo {
    #[serde(default)]
    pub thread: Thread,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl ThreadInfo {
    /// Drop posts that don't belong to this thread.
    ///
    /// Returns the number of posts removed.
    pub(crate) fn retain_own_posts(&mut self) -> usize {
        let thread_id = self.thread.thread_id;
        let before = self.posts.len();
        self.posts.retain(|p| p.thread_id == thread_id);
        before - self.posts.len()
    }
}
