//! Thread and reply state management
//!
//! This module contains the state containers the thread screens observe:
//! - ThreadSyncState: bound thread, accumulated posts, page cursor
//! - ReplyCoordinator: reply submission lifecycle
//! - PaginationCursor / merge helpers used by the above

pub mod pagination;
pub mod posts;
pub mod reply;
pub mod thread_sync;

pub use pagination::PaginationCursor;
pub use posts::merge_page;
pub use reply::{ReplyAttempt, ReplyCoordinator, ReplyFailure, ReplyStatus, SubmitOutcome};
pub use thread_sync::{LoadOutcome, SyncStatus, ThreadSnapshot, ThreadSyncState};
