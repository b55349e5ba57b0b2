//! Common test utilities for integration tests.
//!
//! Fixtures for threads and posts plus small helpers for wiring the sync
//! core to a scripted forum.
//!
//! # Example
//!
//! ```ignore
//! use common::{thread_info, sync_state};
//!
//! let (forum, state) = sync_state();
//! forum.push_fetch(Ok(thread_info(7, &[1, 2])));
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use relabs::adapters::MockForum;
use relabs::models::{Pagination, Post, PostReply, Thread, ThreadId, ThreadInfo};
use relabs::state::ThreadSyncState;
use tokio_util::sync::CancellationToken;

/// Shorthand for a valid thread id.
pub fn tid(raw: i64) -> ThreadId {
    ThreadId::new(raw).expect("test thread id must be positive")
}

/// A post whose position equals its id.
pub fn post(thread_id: u32, post_id: u32) -> Post {
    post_at(thread_id, post_id, post_id)
}

pub fn post_at(thread_id: u32, post_id: u32, position: u32) -> Post {
    Post {
        post_id,
        thread_id,
        author: format!("user{}", post_id),
        body: format!("post {} body", post_id),
        position,
        ..Default::default()
    }
}

/// Thread info with the given post ids and no pagination metadata.
pub fn thread_info(thread_id: u32, post_ids: &[u32]) -> ThreadInfo {
    ThreadInfo {
        thread: Thread {
            thread_id,
            title: format!("Thread {}", thread_id),
            reply_count: post_ids.len().saturating_sub(1) as u32,
            ..Default::default()
        },
        posts: post_ids.iter().map(|&id| post(thread_id, id)).collect(),
        pagination: None,
    }
}

/// Thread info that reports `last_page` pages.
pub fn paged_info(thread_id: u32, post_ids: &[u32], current_page: u32, last_page: u32) -> ThreadInfo {
    ThreadInfo {
        pagination: Some(Pagination {
            current_page,
            last_page,
            per_page: 20,
            total: last_page * 20,
        }),
        ..thread_info(thread_id, post_ids)
    }
}

pub fn reply_ok() -> PostReply {
    PostReply {
        success: true,
        post: None,
    }
}

pub fn reply_refused() -> PostReply {
    PostReply {
        success: false,
        post: None,
    }
}

/// A scripted forum and a sync state bound to it.
pub fn sync_state() -> (Arc<MockForum>, Arc<ThreadSyncState<MockForum>>) {
    let forum = Arc::new(MockForum::new());
    let state = Arc::new(ThreadSyncState::new(
        Arc::clone(&forum),
        CancellationToken::new(),
    ));
    (forum, state)
}

pub fn post_ids(posts: &[Post]) -> Vec<u32> {
    posts.iter().map(|p| p.post_id).collect()
}
