//! Thread content synchronization.
//!
//! [`ThreadSyncState`] owns what the thread screen shows: the bound
//! thread, its accumulated posts and the page cursor. Every change is
//! published as a whole [`ThreadSnapshot`] on a watch channel, so readers
//! never see a thread from one binding next to posts from another.
//!
//! Each binding (a call to [`ThreadSyncState::load_initial`]) gets a
//! generation number and a cancellation token. A result that comes back
//! for an older generation is dropped without touching state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::error::{ForumResult, NetworkError, StateError};
use crate::models::{Pagination, Post, Thread, ThreadId, ThreadInfo};
use crate::traits::ForumApi;

use super::pagination::PaginationCursor;
use super::posts;

/// Load status of the bound thread.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SyncStatus {
    /// Nothing bound
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch was applied
    Loaded,
    /// The last fetch failed; content from before the fetch is kept
    Failed(NetworkError),
}

/// Immutable view of the thread screen state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadSnapshot {
    pub thread: Thread,
    /// Accumulated posts ordered by position
    pub posts: Vec<Post>,
    pub pagination: Option<Pagination>,
    /// Last page requested. 0 means only the initial load.
    pub current_page: u32,
    pub status: SyncStatus,
    /// Binding this snapshot belongs to
    pub generation: u64,
}

impl ThreadSnapshot {
    /// The displayed content as a [`ThreadInfo`].
    pub fn info(&self) -> ThreadInfo {
        ThreadInfo {
            thread: self.thread.clone(),
            posts: self.posts.clone(),
            pagination: self.pagination,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, SyncStatus::Loading)
    }

    pub fn error(&self) -> Option<&NetworkError> {
        match &self.status {
            SyncStatus::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// What a load call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched content was applied
    Applied,
    /// Nothing was requested
    Skipped(StateError),
    /// The result arrived for a binding that is no longer current, or the
    /// fetch was cancelled
    Discarded,
}

struct Binding {
    generation: u64,
    thread_id: Option<ThreadId>,
    cursor: PaginationCursor,
    in_flight: bool,
    token: CancellationToken,
}

/// Single owner of the displayed thread and its posts.
pub struct ThreadSyncState<F: ForumApi + ?Sized> {
    forum: Arc<F>,
    scope: CancellationToken,
    binding: Mutex<Binding>,
    snapshot: watch::Sender<ThreadSnapshot>,
}

impl<F: ForumApi + ?Sized> ThreadSyncState<F> {
    /// Create an unbound state. Cancelling `scope` cancels every fetch
    /// this state starts.
    pub fn new(forum: Arc<F>, scope: CancellationToken) -> Self {
        let (snapshot, _) = watch::channel(ThreadSnapshot::default());
        let token = scope.child_token();
        Self {
            forum,
            scope,
            binding: Mutex::new(Binding {
                generation: 0,
                thread_id: None,
                cursor: PaginationCursor::new(),
                in_flight: false,
                token,
            }),
            snapshot,
        }
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<ThreadSnapshot> {
        self.snapshot.subscribe()
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> ThreadSnapshot {
        self.snapshot.borrow().clone()
    }

    /// The thread id the state is bound to, loaded or not.
    pub fn bound_thread(&self) -> Option<ThreadId> {
        self.binding().thread_id
    }

    pub fn current_page(&self) -> u32 {
        self.binding().cursor.current_page()
    }

    fn binding(&self) -> MutexGuard<'_, Binding> {
        self.binding.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bind to `thread_id` and fetch its first page.
    ///
    /// Any fetch still running for the previous binding is cancelled. When
    /// the thread id changes the displayed content is cleared right away;
    /// reloading the same thread keeps it on screen until the new content
    /// arrives.
    pub async fn load_initial(&self, thread_id: ThreadId) -> ForumResult<LoadOutcome> {
        let (generation, token) = {
            let mut binding = self.binding();
            binding.token.cancel();
            binding.token = self.scope.child_token();
            binding.generation += 1;

            let rebinding = binding.thread_id != Some(thread_id);
            binding.thread_id = Some(thread_id);
            binding.cursor.reset();
            binding.in_flight = true;

            let generation = binding.generation;
            self.snapshot.send_modify(|s| {
                if rebinding {
                    *s = ThreadSnapshot::default();
                }
                s.current_page = 0;
                s.status = SyncStatus::Loading;
                s.generation = generation;
            });
            (generation, binding.token.clone())
        };

        tracing::debug!(%thread_id, generation, "Loading thread");

        let pending = InFlight::new(self, generation, None);
        let result = tokio::select! {
            _ = token.cancelled() => None,
            result = self.forum.fetch_thread_info(thread_id, true, None) => Some(result),
        };
        let Some(result) = result else {
            tracing::debug!(%thread_id, generation, "Initial load cancelled");
            return Ok(LoadOutcome::Discarded);
        };
        pending.disarm();

        let mut binding = self.binding();
        if binding.generation != generation {
            tracing::warn!(%thread_id, generation, current = binding.generation, "Discarding stale thread load");
            return Ok(LoadOutcome::Discarded);
        }
        binding.in_flight = false;

        match result.and_then(|info| checked(info, thread_id)) {
            Ok(mut info) => {
                posts::normalize(&mut info.posts);
                binding.cursor.observe(info.pagination.as_ref());
                let count = info.posts.len();
                self.snapshot.send_replace(ThreadSnapshot {
                    thread: info.thread,
                    posts: info.posts,
                    pagination: info.pagination,
                    current_page: 0,
                    status: SyncStatus::Loaded,
                    generation,
                });
                tracing::info!(%thread_id, generation, posts = count, "Thread loaded");
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                tracing::warn!(%thread_id, generation, error = %err, "Thread load failed");
                self.snapshot
                    .send_modify(|s| s.status = SyncStatus::Failed(err.clone()));
                Err(err.into())
            }
        }
    }

    /// Fetch the page after the cursor and append its posts.
    ///
    /// Does nothing unless a thread has been loaded, no fetch is running
    /// and the server has not reported the last page as reached. The
    /// cursor moves before the request is issued and moves back if it
    /// fails.
    pub async fn load_next_page(&self) -> ForumResult<LoadOutcome> {
        let (generation, token, thread_id, previous, page) = {
            let mut binding = self.binding();
            let loaded = self.snapshot.borrow().thread.id();

            let thread_id = match (loaded, binding.thread_id) {
                (Some(loaded), Some(bound)) if loaded == bound => bound,
                _ => return Ok(skip(StateError::NotLoaded)),
            };
            if binding.in_flight {
                return Ok(skip(StateError::FetchInFlight));
            }
            if binding.cursor.is_exhausted() {
                return Ok(skip(StateError::PagesExhausted));
            }

            let previous = binding.cursor.current_page();
            let page = binding.cursor.advance();
            binding.in_flight = true;
            self.snapshot.send_modify(|s| {
                s.current_page = page;
                s.status = SyncStatus::Loading;
            });
            (
                binding.generation,
                binding.token.clone(),
                thread_id,
                previous,
                page,
            )
        };

        tracing::debug!(%thread_id, page, generation, "Loading next page");

        let pending = InFlight::new(self, generation, Some(previous));
        let result = tokio::select! {
            _ = token.cancelled() => None,
            result = self.forum.fetch_thread_info(thread_id, true, Some(page)) => Some(result),
        };
        let Some(result) = result else {
            tracing::debug!(%thread_id, page, "Page load cancelled");
            return Ok(LoadOutcome::Discarded);
        };
        pending.disarm();

        let mut binding = self.binding();
        if binding.generation != generation {
            tracing::warn!(%thread_id, page, generation, "Discarding stale page");
            return Ok(LoadOutcome::Discarded);
        }
        binding.in_flight = false;

        match result.and_then(|info| checked(info, thread_id)) {
            Ok(info) => {
                binding.cursor.observe(info.pagination.as_ref());
                let mut added = 0;
                self.snapshot.send_modify(|s| {
                    added = posts::merge_page(&mut s.posts, info.posts);
                    s.thread = info.thread;
                    if info.pagination.is_some() {
                        s.pagination = info.pagination;
                    }
                    s.status = SyncStatus::Loaded;
                });
                tracing::info!(%thread_id, page, added, "Page appended");
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                binding.cursor.rollback(previous);
                tracing::warn!(%thread_id, page, error = %err, "Page load failed");
                self.snapshot.send_modify(|s| {
                    s.current_page = previous;
                    s.status = SyncStatus::Failed(err.clone());
                });
                Err(err.into())
            }
        }
    }

    /// Leave `Loading` after a fetch under a live binding was abandoned.
    fn settle_cancelled(&self) {
        self.snapshot.send_modify(|s| {
            s.status = if s.thread.is_loaded() {
                SyncStatus::Loaded
            } else {
                SyncStatus::Idle
            };
        });
    }

    /// Reload the bound thread from its first page.
    pub async fn refresh(&self) -> ForumResult<LoadOutcome> {
        let bound = self.binding().thread_id;
        match bound {
            Some(thread_id) => self.load_initial(thread_id).await,
            None => Ok(skip(StateError::NotLoaded)),
        }
    }

    /// Unbind: cancel any running fetch and clear the displayed content.
    pub fn cancel(&self) {
        let mut binding = self.binding();
        binding.token.cancel();
        binding.token = self.scope.child_token();
        binding.generation += 1;
        binding.thread_id = None;
        binding.cursor.reset();
        binding.in_flight = false;

        let generation = binding.generation;
        self.snapshot.send_replace(ThreadSnapshot {
            generation,
            ..ThreadSnapshot::default()
        });
        tracing::debug!(generation, "Thread state cleared");
    }
}

impl<F: ForumApi + ?Sized + 'static> ThreadSyncState<F> {
    /// Run [`load_initial`](Self::load_initial) on the runtime.
    ///
    /// Outcomes are observable through the snapshot channel.
    pub fn spawn_load_initial(
        self: &Arc<Self>,
        thread_id: ThreadId,
    ) -> tokio::task::JoinHandle<ForumResult<LoadOutcome>> {
        let state = Arc::clone(self);
        tokio::spawn(async move { state.load_initial(thread_id).await })
    }

    /// Run [`load_next_page`](Self::load_next_page) on the runtime.
    pub fn spawn_load_next_page(
        self: &Arc<Self>,
    ) -> tokio::task::JoinHandle<ForumResult<LoadOutcome>> {
        let state = Arc::clone(self);
        tokio::spawn(async move { state.load_next_page().await })
    }
}

/// Releases a fetch that never got to apply its result.
///
/// Held across the request. If the load future is cancelled through its
/// token or dropped outright (an aborted task, a lost `select!`), the
/// binding leaves `in_flight`, the page cursor moves back and the snapshot
/// leaves `Loading`. Nothing happens when the binding has moved on.
struct InFlight<'a, F: ForumApi + ?Sized> {
    state: &'a ThreadSyncState<F>,
    generation: u64,
    rollback_to: Option<u32>,
    armed: bool,
}

impl<'a, F: ForumApi + ?Sized> InFlight<'a, F> {
    fn new(state: &'a ThreadSyncState<F>, generation: u64, rollback_to: Option<u32>) -> Self {
        Self {
            state,
            generation,
            rollback_to,
            armed: true,
        }
    }

    /// The fetch returned; the caller applies or discards the result.
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<F: ForumApi + ?Sized> Drop for InFlight<'_, F> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut binding = self.state.binding();
        if binding.generation != self.generation || !binding.in_flight {
            return;
        }
        binding.in_flight = false;
        if let Some(previous) = self.rollback_to {
            binding.cursor.rollback(previous);
            self.state
                .snapshot
                .send_modify(|s| s.current_page = previous);
        }
        self.state.settle_cancelled();
        tracing::debug!(generation = self.generation, "Fetch abandoned before completion");
    }
}

fn skip(reason: StateError) -> LoadOutcome {
    tracing::debug!(%reason, "Load skipped");
    LoadOutcome::Skipped(reason)
}

/// Reject a response for a different thread and drop foreign posts.
fn checked(mut info: ThreadInfo, thread_id: ThreadId) -> Result<ThreadInfo, NetworkError> {
    if info.thread.thread_id != thread_id.get() {
        return Err(NetworkError::InvalidResponse {
            message: format!(
                "requested thread {} but received {}",
                thread_id, info.thread.thread_id
            ),
        });
    }
    info.retain_own_posts();
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockForum;

    fn id(n: i64) -> ThreadId {
        ThreadId::new(n).unwrap()
    }

    fn info(thread_id: u32, post_ids: &[u32]) -> ThreadInfo {
        ThreadInfo {
            thread: Thread {
                thread_id,
                title: format!("Thread {}", thread_id),
                ..Default::default()
            },
            posts: post_ids
                .iter()
                .map(|&post_id| Post {
                    post_id,
                    thread_id,
                    position: post_id,
                    ..Default::default()
                })
                .collect(),
            pagination: None,
        }
    }

    fn state(forum: &Arc<MockForum>) -> ThreadSyncState<MockForum> {
        ThreadSyncState::new(Arc::clone(forum), CancellationToken::new())
    }

    #[tokio::test]
    async fn test_initial_snapshot_is_empty() {
        let forum = Arc::new(MockForum::new());
        let state = state(&forum);
        let snapshot = state.snapshot();
        assert!(!snapshot.thread.is_loaded());
        assert_eq!(snapshot.status, SyncStatus::Idle);
        assert_eq!(state.bound_thread(), None);
    }

    #[tokio::test]
    async fn test_response_for_other_thread_is_rejected() {
        let forum = Arc::new(MockForum::new());
        forum.push_fetch(Ok(info(9, &[1])));
        let state = state(&forum);

        let result = state.load_initial(id(5)).await;
        assert!(result.is_err());
        assert!(!state.snapshot().thread.is_loaded());
        assert!(state.snapshot().error().is_some());
    }

    #[tokio::test]
    async fn test_cancel_clears_and_unbinds() {
        let forum = Arc::new(MockForum::new());
        forum.push_fetch(Ok(info(5, &[1, 2])));
        let state = state(&forum);
        state.load_initial(id(5)).await.unwrap();

        state.cancel();
        let snapshot = state.snapshot();
        assert!(snapshot.posts.is_empty());
        assert_eq!(state.bound_thread(), None);
        assert_eq!(
            state.refresh().await.unwrap(),
            LoadOutcome::Skipped(StateError::NotLoaded)
        );
    }

    #[tokio::test]
    async fn test_scope_cancellation_discards_fetch() {
        let forum = Arc::new(MockForum::new());
        let _release = forum.hold_fetch();
        let scope = CancellationToken::new();
        let state = Arc::new(ThreadSyncState::new(Arc::clone(&forum), scope.clone()));

        let handle = state.spawn_load_initial(id(5));
        forum.wait_for_fetch_calls(1).await;
        scope.cancel();

        assert_eq!(handle.await.unwrap().unwrap(), LoadOutcome::Discarded);
    }

    #[tokio::test]
    async fn test_scope_cancellation_rolls_page_back() {
        let forum = Arc::new(MockForum::new());
        forum.push_fetch(Ok(info(5, &[1, 2])));
        let scope = CancellationToken::new();
        let state = Arc::new(ThreadSyncState::new(Arc::clone(&forum), scope.clone()));
        state.load_initial(id(5)).await.unwrap();

        let _release = forum.hold_fetch();
        let handle = state.spawn_load_next_page();
        forum.wait_for_fetch_calls(2).await;
        scope.cancel();

        assert_eq!(handle.await.unwrap().unwrap(), LoadOutcome::Discarded);
        assert_eq!(state.current_page(), 0);
        assert_eq!(state.snapshot().status, SyncStatus::Loaded);
    }

    #[tokio::test]
    async fn test_aborted_initial_load_settles() {
        let forum = Arc::new(MockForum::new());
        let _release = forum.hold_fetch();
        let state = Arc::new(state(&forum));

        let handle = state.spawn_load_initial(id(5));
        forum.wait_for_fetch_calls(1).await;
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());

        let snapshot = state.snapshot();
        assert_eq!(snapshot.status, SyncStatus::Idle);
        assert_eq!(state.bound_thread(), Some(id(5)));

        forum.push_fetch(Ok(info(5, &[1])));
        assert_eq!(state.refresh().await.unwrap(), LoadOutcome::Applied);
    }

    #[tokio::test]
    async fn test_snapshot_info_round_trip() {
        let forum = Arc::new(MockForum::new());
        let expected = info(5, &[1, 2]);
        forum.push_fetch(Ok(expected.clone()));
        let state = state(&forum);

        state.load_initial(id(5)).await.unwrap();
        assert_eq!(state.snapshot().info(), expected);
    }
}
