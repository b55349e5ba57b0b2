//! On-disk session storage.
//!
//! The session lives in `~/.relabs/session.json` unless a path is configured.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::traits::SessionError;

const SESSION_DIR: &str = ".relabs";
const SESSION_FILE: &str = "session.json";

/// Persisted authentication state.
///
/// Written by the login flow, read once by the core at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Bearer token for API calls.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Refresh token, if the login flow issued one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Id of the signed-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u32>,
}

impl Session {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Default::default()
        }
    }

    /// True when a non-blank access token is present.
    pub fn has_token(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user_id.is_none()
    }
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionFileManager {
    session_path: PathBuf,
}

impl SessionFileManager {
    /// Manager for the default location under the home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            session_path: home.join(SESSION_DIR).join(SESSION_FILE),
        })
    }

    /// Manager for an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            session_path: path.into(),
        }
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    /// Load the session file.
    ///
    /// A missing file or a file holding an empty session yields `Ok(None)`.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        if !self.session_path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.session_path).map_err(|e| SessionError::Io(e.to_string()))?;
        let session: Session = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SessionError::Serialization(e.to_string()))?;

        if session.is_empty() {
            Ok(None)
        } else {
            Ok(Some(session))
        }
    }

    /// Write the session file, creating the parent directory if needed.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.session_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| SessionError::SaveFailed(e.to_string()))?;
            }
        }

        let file =
            File::create(&self.session_path).map_err(|e| SessionError::SaveFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, session)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| SessionError::SaveFailed(e.to_string()))
    }

    /// Remove the session file. A missing file is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        if !self.session_path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.session_path).map_err(|e| SessionError::ClearFailed(e.to_string()))
    }
}
