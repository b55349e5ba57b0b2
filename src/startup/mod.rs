//! Startup module for session loading and client construction.
//!
//! Everything main() needs before the first screen is shown, with the
//! session source injected so it can be tested without touching disk.
//!
//! # Usage
//!
//! ```ignore
//! use relabs::startup::{bootstrap, ForumConfig};
//!
//! let config = ForumConfig::from_env();
//! let result = bootstrap(&config).await?;
//! // result.initial_route is Home or Login
//! ```

pub mod config;

pub use config::{ForumConfig, StartupResult, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

use crate::adapters::FileSessionProvider;
use crate::error::ForumResult;
use crate::forum::ForumClient;
use crate::navigation::initial_route;
use crate::session::SessionStore;
use crate::traits::SessionProvider;

/// Load the session from the configured file and build the client.
///
/// Without a home directory there is nowhere to read a session from, so
/// startup continues signed out.
pub async fn bootstrap(config: &ForumConfig) -> ForumResult<StartupResult> {
    let provider = match &config.session_file {
        Some(path) => FileSessionProvider::with_path(path.clone()),
        None => match FileSessionProvider::new() {
            Ok(provider) => provider,
            Err(e) => {
                tracing::warn!(error = %e, "No session location, starting signed out");
                return assemble(config, SessionStore::default());
            }
        },
    };
    bootstrap_with(config, &provider).await
}

/// Bootstrap with an explicit session source.
pub async fn bootstrap_with<P>(config: &ForumConfig, provider: &P) -> ForumResult<StartupResult>
where
    P: SessionProvider + ?Sized,
{
    let session = SessionStore::load(provider).await;
    assemble(config, session)
}

fn assemble(config: &ForumConfig, session: SessionStore) -> ForumResult<StartupResult> {
    let route = initial_route(&session);
    tracing::info!(route = %route, authenticated = session.is_authenticated(), base_url = %config.base_url, "Startup complete");

    let forum = ForumClient::from_config(config, session.clone())?;
    Ok(StartupResult {
        session,
        initial_route: route,
        forum,
    })
}
