//! Startup configuration types.
//!
//! This module defines the configuration for talking to the forum and the
//! result of bootstrapping a session.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::VERSION;
use crate::forum::ForumClient;
use crate::navigation::Route;
use crate::session::SessionStore;

/// Default API root of the forum.
pub const DEFAULT_API_URL: &str = "https://xdaforums.com/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the forum client and session storage.
///
/// Use the builder pattern to customize.
///
/// # Example
///
/// ```ignore
/// use relabs::startup::ForumConfig;
///
/// let config = ForumConfig::default()
///     .with_base_url("http://localhost:8080/api")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForumConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// Per-request timeout (default: 30s)
    pub request_timeout: Duration,
    /// Session file override (default: ~/.relabs/session.json)
    pub session_file: Option<PathBuf>,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: None,
            user_agent: format!("relabs/{}", VERSION),
        }
    }
}

impl ForumConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the session file location.
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Create config from `RELABS_API_URL`, `RELABS_TIMEOUT_SECS` and
    /// `RELABS_SESSION_FILE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source.
    ///
    /// Empty values are treated as unset. A timeout that is not a positive
    /// integer falls back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("RELABS_API_URL") {
            config = config.with_base_url(url.trim());
        }

        if let Some(raw) = get("RELABS_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config = config.with_timeout(Duration::from_secs(secs)),
                _ => tracing::warn!(value = %raw, "Ignoring invalid RELABS_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = get("RELABS_SESSION_FILE") {
            config = config.with_session_file(path);
        }

        config
    }
}

/// Result of a successful bootstrap.
///
/// Contains everything needed to open the first screen.
pub struct StartupResult {
    /// Session loaded from storage (token may be empty)
    pub session: SessionStore,
    /// First screen to show
    pub initial_route: Route,
    /// Client authorized with the session token
    pub forum: ForumClient,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default() {
        let config = ForumConfig::default();
        assert_eq!(config.base_url, "https://xdaforums.com/api");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.session_file.is_none());
        assert!(config.user_agent.starts_with("relabs/"));
    }

    #[test]
    fn test_builder() {
        let config = ForumConfig::new()
            .with_base_url("http://localhost:8080/api/")
            .with_timeout(Duration::from_secs(5))
            .with_session_file("/tmp/session.json");

        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.session_file, Some(PathBuf::from("/tmp/session.json")));
    }

    #[test]
    fn test_from_lookup() {
        let config = ForumConfig::from_lookup(lookup(&[
            ("RELABS_API_URL", "https://forum.test/api"),
            ("RELABS_TIMEOUT_SECS", "12"),
            ("RELABS_SESSION_FILE", "/var/relabs/s.json"),
        ]));

        assert_eq!(config.base_url, "https://forum.test/api");
        assert_eq!(config.request_timeout, Duration::from_secs(12));
        assert_eq!(config.session_file, Some(PathBuf::from("/var/relabs/s.json")));
    }

    #[test]
    fn test_from_lookup_ignores_bad_values() {
        let config = ForumConfig::from_lookup(lookup(&[
            ("RELABS_API_URL", "  "),
            ("RELABS_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config, ForumConfig::default());

        let config = ForumConfig::from_lookup(lookup(&[("RELABS_TIMEOUT_SECS", "0")]));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
