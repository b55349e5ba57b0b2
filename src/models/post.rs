use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_nullable_string, deserialize_timestamp};

/// A single message within a thread
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Post {
    /// Unique post id
    #[serde(default)]
    pub post_id: u32,
    /// Thread this post belongs to
    #[serde(default)]
    pub thread_id: u32,
    /// Author display name (API sends as "username")
    #[serde(default, rename = "username", deserialize_with = "deserialize_nullable_string")]
    pub author: String,
    /// Raw BB-code body (API sends as "message")
    #[serde(default, rename = "message", deserialize_with = "deserialize_nullable_string")]
    pub body: String,
    /// When the post was created (API sends unix seconds as "post_date")
    #[serde(default, rename = "post_date", deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Order within the thread as the API reports it
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub reaction_score: i32,
    #[serde(default)]
    pub is_first_post: bool,
}

/// Result of submitting a reply
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostReply {
    /// Whether the server accepted the reply
    #[serde(default)]
    pub success: bool,
    /// The created post, when the server echoes it back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
}
