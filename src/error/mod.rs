//! Error handling for the forum sync core.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: Network, Validation and Session errors
//! - **Unified Error Type**: `ForumError` consolidates them
//! - **State reasons**: `StateError` explains silent no-ops, it is never returned as `Err`
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout | Yes |
//! | Auth | Token rejected (401) | No |
//! | Server | 5xx, malformed payload | Yes |
//! | User | Blank reply, bad thread id, 4xx | No |
//! | System | Session file I/O | No |

mod category;
mod forum_error;
mod network;
mod result;
mod state;
mod validation;

pub use category::ErrorCategory;
pub use forum_error::ForumError;
pub use network::NetworkError;
pub use result::ForumResult;
pub use state::StateError;
pub use validation::ValidationError;
