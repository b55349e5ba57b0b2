//! File-based session provider adapter.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::session::{Session, SessionFileManager};
use crate::traits::{SessionError, SessionProvider};

/// Session provider backed by a JSON file.
///
/// File access is blocking and small, so it runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct FileSessionProvider {
    manager: SessionFileManager,
}

impl FileSessionProvider {
    /// Provider for `~/.relabs/session.json`.
    pub fn new() -> Result<Self, SessionError> {
        SessionFileManager::new()
            .map(|manager| Self { manager })
            .ok_or_else(|| SessionError::Io("Failed to determine home directory".to_string()))
    }

    /// Provider for an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            manager: SessionFileManager::with_path(path),
        }
    }

    pub fn session_path(&self) -> &Path {
        self.manager.session_path()
    }

    async fn run<T, F>(&self, op: F) -> Result<T, SessionError>
    where
        T: Send + 'static,
        F: FnOnce(SessionFileManager) -> Result<T, SessionError> + Send + 'static,
    {
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || op(manager))
            .await
            .map_err(|e| SessionError::Io(e.to_string()))?
    }
}

#[async_trait]
impl SessionProvider for FileSessionProvider {
    async fn load(&self) -> Result<Option<Session>, SessionError> {
        self.run(|m| m.load()).await
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        let session = session.clone();
        self.run(move |m| m.save(&session)).await
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.run(|m| m.clear()).await
    }
}
