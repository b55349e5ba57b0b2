//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`InMemorySession`] - In-memory session storage
//! - [`MockForum`] - Scripted forum API with held (in-flight) responses

pub mod forum;
pub mod http;
pub mod session;

pub use forum::{FetchCall, MockForum, Release, ReplyCall};
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use session::InMemorySession;
