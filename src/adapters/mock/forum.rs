//! Scripted forum API for testing the sync core.
//!
//! Responses are queued in call order. A response can be held back so a
//! test can observe the state while a fetch or reply is still in flight.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;

use crate::error::NetworkError;
use crate::models::{PostReply, ThreadId, ThreadInfo};
use crate::traits::ForumApi;

/// A recorded `fetch_thread_info` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub thread_id: ThreadId,
    pub with_posts: bool,
    pub page: Option<u32>,
}

/// A recorded `submit_reply` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyCall {
    pub thread_id: ThreadId,
    pub body: String,
}

/// Sender that releases a held response.
pub type Release<T> = oneshot::Sender<Result<T, NetworkError>>;

enum Scripted<T> {
    Ready(Result<T, NetworkError>),
    Held(oneshot::Receiver<Result<T, NetworkError>>),
}

impl<T> Scripted<T> {
    async fn resolve(self) -> Result<T, NetworkError> {
        match self {
            Scripted::Ready(result) => result,
            // Dropping the release handle reads as a cancelled request
            Scripted::Held(rx) => rx.await.unwrap_or(Err(NetworkError::Cancelled)),
        }
    }
}

/// Scripted [`ForumApi`] implementation.
#[derive(Default)]
pub struct MockForum {
    fetches: Mutex<VecDeque<Scripted<ThreadInfo>>>,
    replies: Mutex<VecDeque<Scripted<PostReply>>>,
    fetch_calls: Mutex<Vec<FetchCall>>,
    reply_calls: Mutex<Vec<ReplyCall>>,
}

impl MockForum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next fetch.
    pub fn push_fetch(&self, result: Result<ThreadInfo, NetworkError>) {
        self.fetches
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(result));
    }

    /// Queue a fetch that stays in flight until released.
    pub fn hold_fetch(&self) -> Release<ThreadInfo> {
        let (tx, rx) = oneshot::channel();
        self.fetches.lock().unwrap().push_back(Scripted::Held(rx));
        tx
    }

    /// Queue the result of the next reply.
    pub fn push_reply(&self, result: Result<PostReply, NetworkError>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(result));
    }

    /// Queue a reply that stays in flight until released.
    pub fn hold_reply(&self) -> Release<PostReply> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(Scripted::Held(rx));
        tx
    }

    pub fn fetch_calls(&self) -> Vec<FetchCall> {
        self.fetch_calls.lock().unwrap().clone()
    }

    pub fn reply_calls(&self) -> Vec<ReplyCall> {
        self.reply_calls.lock().unwrap().clone()
    }

    /// Wait until at least `n` fetches have been issued.
    ///
    /// Panics after five seconds so a broken test fails instead of hanging.
    pub async fn wait_for_fetch_calls(&self, n: usize) {
        wait_until(|| self.fetch_calls.lock().unwrap().len() >= n).await;
    }

    /// Wait until at least `n` replies have been issued.
    pub async fn wait_for_reply_calls(&self, n: usize) {
        wait_until(|| self.reply_calls.lock().unwrap().len() >= n).await;
    }
}

async fn wait_until<F: Fn() -> bool>(done: F) {
    let waited = tokio::time::timeout(Duration::from_secs(5), async {
        while !done() {
            tokio::task::yield_now().await;
        }
    })
    .await;
    assert!(waited.is_ok(), "timed out waiting for mock forum calls");
}

#[async_trait]
impl ForumApi for MockForum {
    async fn fetch_thread_info(
        &self,
        thread_id: ThreadId,
        with_posts: bool,
        page: Option<u32>,
    ) -> Result<ThreadInfo, NetworkError> {
        self.fetch_calls.lock().unwrap().push(FetchCall {
            thread_id,
            with_posts,
            page,
        });
        let scripted = self.fetches.lock().unwrap().pop_front();
        match scripted {
            Some(scripted) => scripted.resolve().await,
            None => Err(NetworkError::Other {
                message: "no scripted fetch".to_string(),
            }),
        }
    }

    async fn submit_reply(
        &self,
        thread_id: ThreadId,
        body: &str,
    ) -> Result<PostReply, NetworkError> {
        self.reply_calls.lock().unwrap().push(ReplyCall {
            thread_id,
            body: body.to_string(),
        });
        let scripted = self.replies.lock().unwrap().pop_front();
        match scripted {
            Some(scripted) => scripted.resolve().await,
            None => Err(NetworkError::Other {
                message: "no scripted reply".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i64) -> ThreadId {
        ThreadId::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_ready_responses_in_order() {
        let forum = MockForum::new();
        forum.push_fetch(Ok(ThreadInfo::default()));
        forum.push_fetch(Err(NetworkError::Cancelled));

        assert!(forum.fetch_thread_info(id(1), true, None).await.is_ok());
        assert!(forum.fetch_thread_info(id(1), true, Some(1)).await.is_err());

        let calls = forum.fetch_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].page, Some(1));
    }

    #[tokio::test]
    async fn test_unscripted_call_errors() {
        let forum = MockForum::new();
        assert!(forum.submit_reply(id(1), "hi").await.is_err());
        assert_eq!(forum.reply_calls()[0].body, "hi");
    }

    #[tokio::test]
    async fn test_dropped_release_is_cancelled() {
        let forum = MockForum::new();
        let release = forum.hold_reply();
        drop(release);
        assert_eq!(
            forum.submit_reply(id(2), "x").await,
            Err(NetworkError::Cancelled)
        );
    }
}
