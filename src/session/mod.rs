//! Session handling: the persisted bearer token and its read-only view.

mod storage;

pub use storage::{Session, SessionFileManager};

use crate::traits::SessionProvider;

/// Read-only access to the session token, loaded once at startup.
///
/// The core never mutates the session. An absent token is a normal state
/// (signed out) and every accessor tolerates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    access_token: String,
}

impl SessionStore {
    /// Load the session from a provider.
    ///
    /// Never fails: a missing, unreadable or corrupt session is logged and
    /// treated as signed out.
    pub async fn load<P: SessionProvider + ?Sized>(provider: &P) -> Self {
        match provider.load().await {
            Ok(Some(session)) => Self::from_session(&session),
            Ok(None) => {
                tracing::debug!("No stored session");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load session, continuing signed out");
                Self::default()
            }
        }
    }

    pub fn from_session(session: &Session) -> Self {
        Self {
            access_token: session.access_token.clone().unwrap_or_default(),
        }
    }

    /// Store holding a fixed token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: token.into(),
        }
    }

    /// The access token, or an empty string when absent.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// True when the token is non-blank.
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.trim().is_empty()
    }

    /// The `Authorization` header value, when signed in.
    pub fn bearer(&self) -> Option<String> {
        self.is_authenticated()
            .then(|| format!("Bearer {}", self.access_token.trim()))
    }
}
