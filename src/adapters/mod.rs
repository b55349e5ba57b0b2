//! Concrete implementations of trait abstractions.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileSessionProvider`] - File-based session storage
//!
//! The [`mock`] submodule provides test doubles for every seam.

pub mod file_session;
pub mod mock;
pub mod reqwest_http;

pub use file_session::FileSessionProvider;
pub use mock::{InMemorySession, MockForum, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
