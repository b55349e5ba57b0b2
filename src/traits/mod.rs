//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST)
//! - [`SessionProvider`] - Session storage and retrieval
//! - [`ForumApi`] - Thread fetching and reply submission

pub mod forum;
pub mod http;
pub mod session;

pub use forum::ForumApi;
pub use http::{Headers, HttpClient, HttpError, Response};
pub use session::{SessionError, SessionProvider};
