//! Forum API trait abstraction.
//!
//! The sync core talks to the forum only through this trait, which keeps
//! [`crate::state::ThreadSyncState`] and [`crate::state::ReplyCoordinator`]
//! testable with scripted responses.

use async_trait::async_trait;

use crate::error::NetworkError;
use crate::models::{PostReply, ThreadId, ThreadInfo};

/// Stateless boundary to the remote forum.
#[async_trait]
pub trait ForumApi: Send + Sync {
    /// Fetch one page of a thread.
    ///
    /// `page` is 1-based; `None` lets the server pick its default (first)
    /// page. The result covers the requested page only and is never merged
    /// with anything fetched before.
    async fn fetch_thread_info(
        &self,
        thread_id: ThreadId,
        with_posts: bool,
        page: Option<u32>,
    ) -> Result<ThreadInfo, NetworkError>;

    /// Post a reply to a thread.
    ///
    /// Exactly one network call per invocation. There is no idempotency key,
    /// so calling this twice may create two posts.
    async fn submit_reply(&self, thread_id: ThreadId, body: &str)
        -> Result<PostReply, NetworkError>;
}
