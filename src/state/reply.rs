//! Reply submission lifecycle.
//!
//! `Idle → Posting → Succeeded | Failed → Idle`. The transition into
//! `Posting` is a single check-and-set on the watch channel, so a second
//! submit racing the first is dropped rather than queued.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{ForumResult, NetworkError, StateError, ValidationError};
use crate::models::{PostReply, ThreadId};
use crate::navigation::NavigationHandle;
use crate::traits::ForumApi;

/// Why a reply ended in `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyFailure {
    /// The server answered with `success: false`
    Rejected,
    Network(NetworkError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReplyStatus {
    #[default]
    Idle,
    Posting,
    Succeeded(PostReply),
    Failed(ReplyFailure),
}

impl ReplyStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReplyStatus::Succeeded(_) | ReplyStatus::Failed(_))
    }
}

/// The reply currently being posted, or the result of the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyAttempt {
    pub thread_id: ThreadId,
    pub body: String,
    pub status: ReplyStatus,
}

/// What a [`ReplyCoordinator::submit`] call did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Accepted by the server; navigate-back was sent
    Succeeded(PostReply),
    /// Delivered but refused by the server
    Rejected(PostReply),
    /// Not sent because of the current state
    Ignored(StateError),
}

/// Drives reply submission and signals navigation on success.
pub struct ReplyCoordinator<F: ForumApi + ?Sized> {
    forum: Arc<F>,
    navigation: NavigationHandle,
    attempt: watch::Sender<Option<ReplyAttempt>>,
}

impl<F: ForumApi + ?Sized> ReplyCoordinator<F> {
    pub fn new(forum: Arc<F>, navigation: NavigationHandle) -> Self {
        let (attempt, _) = watch::channel(None);
        Self {
            forum,
            navigation,
            attempt,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ReplyAttempt>> {
        self.attempt.subscribe()
    }

    pub fn attempt(&self) -> Option<ReplyAttempt> {
        self.attempt.borrow().clone()
    }

    /// Current status; `Idle` when there is no attempt.
    pub fn status(&self) -> ReplyStatus {
        self.attempt
            .borrow()
            .as_ref()
            .map(|a| a.status.clone())
            .unwrap_or_default()
    }

    pub fn is_posting(&self) -> bool {
        matches!(self.status(), ReplyStatus::Posting)
    }

    /// Post `body` as a reply to `thread_id`.
    ///
    /// A blank body is rejected before anything is sent. While a reply is
    /// posting, or a successful one has not been acknowledged, the call is
    /// ignored. Submitting after a failure replaces the failed attempt.
    pub async fn submit(&self, thread_id: ThreadId, body: &str) -> ForumResult<SubmitOutcome> {
        if body.trim().is_empty() {
            tracing::debug!(%thread_id, "Blank reply rejected");
            return Err(ValidationError::BlankReplyBody.into());
        }

        let mut ignored = None;
        self.attempt.send_if_modified(|current| {
            match current.as_ref().map(|a| &a.status) {
                Some(ReplyStatus::Posting) => {
                    ignored = Some(StateError::ReplyInProgress);
                    false
                }
                Some(ReplyStatus::Succeeded(_)) => {
                    ignored = Some(StateError::UnconsumedResult);
                    false
                }
                _ => {
                    *current = Some(ReplyAttempt {
                        thread_id,
                        body: body.to_string(),
                        status: ReplyStatus::Posting,
                    });
                    true
                }
            }
        });
        if let Some(reason) = ignored {
            tracing::debug!(%thread_id, %reason, "Reply submit ignored");
            return Ok(SubmitOutcome::Ignored(reason));
        }

        tracing::info!(%thread_id, "Posting reply");
        let posting = PostingGuard::new(&self.attempt);
        let result = self.forum.submit_reply(thread_id, body).await;
        posting.disarm();

        match result {
            Ok(reply) if reply.success => {
                self.finish(ReplyStatus::Succeeded(reply.clone()));
                tracing::info!(%thread_id, "Reply posted");
                self.navigation.navigate_back();
                Ok(SubmitOutcome::Succeeded(reply))
            }
            Ok(reply) => {
                tracing::warn!(%thread_id, "Reply rejected by server");
                self.finish(ReplyStatus::Failed(ReplyFailure::Rejected));
                Ok(SubmitOutcome::Rejected(reply))
            }
            Err(err) => {
                tracing::warn!(%thread_id, error = %err, "Reply failed");
                self.finish(ReplyStatus::Failed(ReplyFailure::Network(err.clone())));
                Err(err.into())
            }
        }
    }

    /// Mark a terminal result as consumed and return to `Idle`.
    ///
    /// Returns false when there was nothing to acknowledge.
    pub fn acknowledge(&self) -> bool {
        self.attempt.send_if_modified(|current| {
            let terminal = current
                .as_ref()
                .map(|a| a.status.is_terminal())
                .unwrap_or(false);
            if terminal {
                *current = None;
            }
            terminal
        })
    }

    fn finish(&self, status: ReplyStatus) {
        self.attempt.send_modify(|current| {
            if let Some(attempt) = current {
                attempt.status = status;
            }
        });
    }
}

/// Fails an attempt whose submit future was dropped while posting.
///
/// Without it an aborted submit would leave the coordinator in `Posting`
/// and every later submit would be ignored.
struct PostingGuard<'a> {
    attempt: &'a watch::Sender<Option<ReplyAttempt>>,
    armed: bool,
}

impl<'a> PostingGuard<'a> {
    fn new(attempt: &'a watch::Sender<Option<ReplyAttempt>>) -> Self {
        Self {
            attempt,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PostingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let settled = self.attempt.send_if_modified(|current| match current {
            Some(attempt) if attempt.status == ReplyStatus::Posting => {
                attempt.status =
                    ReplyStatus::Failed(ReplyFailure::Network(NetworkError::Cancelled));
                true
            }
            _ => false,
        });
        if settled {
            tracing::debug!("Reply abandoned while posting");
        }
    }
}
