//! Reasons an operation was skipped because of the current state.
//!
//! None of these are failures. They are carried by the `Skipped` /
//! `Ignored` outcomes of the sync core so callers and logs can tell why
//! nothing happened.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    /// Next page requested before an initial load completed
    #[error("no thread has been loaded yet")]
    NotLoaded,

    /// A fetch for the bound thread is still in flight
    #[error("a fetch for this thread is already in flight")]
    FetchInFlight,

    /// The cursor already reached the last page the server reported
    #[error("no more pages to load")]
    PagesExhausted,

    /// A reply is already being posted
    #[error("a reply is already being posted")]
    ReplyInProgress,

    /// The previous reply's result has not been acknowledged yet
    #[error("the previous reply result has not been acknowledged")]
    UnconsumedResult,
}
