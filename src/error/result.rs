//! Result type alias for forum operations.

use super::forum_error::ForumError;

/// Type alias for Results using ForumError.
///
/// # Example
///
/// ```ignore
/// use relabs::error::ForumResult;
///
/// async fn open(id: ThreadId) -> ForumResult<ThreadInfo> {
///     client.fetch_thread_info(id, true, None).await
/// }
/// ```
pub type ForumResult<T> = Result<T, ForumError>;
