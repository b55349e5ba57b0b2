//! Session provider trait abstraction.
//!
//! Abstracts where the persisted session (the bearer token) lives so the
//! startup path can be tested without touching the home directory.

use async_trait::async_trait;

use crate::session::Session;

/// Session storage errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Failed to load the session
    LoadFailed(String),
    /// Failed to save the session
    SaveFailed(String),
    /// Failed to clear the session
    ClearFailed(String),
    /// IO error
    Io(String),
    /// Serialization/deserialization error
    Serialization(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::LoadFailed(msg) => write!(f, "Failed to load session: {}", msg),
            SessionError::SaveFailed(msg) => write!(f, "Failed to save session: {}", msg),
            SessionError::ClearFailed(msg) => write!(f, "Failed to clear session: {}", msg),
            SessionError::Io(msg) => write!(f, "IO error: {}", msg),
            SessionError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

/// Persistent storage for the [`Session`].
///
/// Only the authentication flow writes; the sync core reads once at startup
/// through [`crate::session::SessionStore`].
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Load the stored session.
    ///
    /// - `Ok(Some(session))` if a session was stored
    /// - `Ok(None)` if nothing is stored
    async fn load(&self) -> Result<Option<Session>, SessionError>;

    /// Persist a session, replacing any previous one.
    async fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Remove the stored session.
    async fn clear(&self) -> Result<(), SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        assert_eq!(
            SessionError::LoadFailed("read error".to_string()).to_string(),
            "Failed to load session: read error"
        );
        assert_eq!(
            SessionError::Serialization("invalid json".to_string()).to_string(),
            "Serialization error: invalid json"
        );
    }

    #[test]
    fn test_session_error_implements_error_trait() {
        let err = SessionError::Io("denied".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
