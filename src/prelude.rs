//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```ignore
//! use relabs::prelude::*;
//! ```
//!
//! This will import:
//! - Model types (Thread, Post, ThreadInfo, ThreadId, PostReply)
//! - The sync core (ThreadSyncState, ReplyCoordinator and their outcomes)
//! - Navigation (Route, NavigationHandle, NavCommand)
//! - Errors and the forum seam

// Model types
pub use crate::models::{Pagination, Post, PostReply, Thread, ThreadId, ThreadInfo};

// Sync core
pub use crate::state::{
    LoadOutcome, ReplyAttempt, ReplyCoordinator, ReplyFailure, ReplyStatus, SubmitOutcome,
    SyncStatus, ThreadSnapshot, ThreadSyncState,
};

// Navigation
pub use crate::navigation::{initial_route, NavCommand, NavigationHandle, Route};

// Client and session
pub use crate::forum::ForumClient;
pub use crate::session::SessionStore;
pub use crate::startup::ForumConfig;

// Errors
pub use crate::error::{ForumError, ForumResult, NetworkError, StateError, ValidationError};

// Traits
pub use crate::traits::ForumApi;
