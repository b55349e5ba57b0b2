//! Typed screen routes.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::models::ThreadId;
use crate::session::SessionStore;

/// Id of the forum rules thread linked from the reply screen.
pub const RULES_THREAD_ID: u32 = 4200559;

const RULES_THREAD: ThreadId = ThreadId::from_raw(RULES_THREAD_ID);

/// A navigable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Home,
    Alerts,
    News,
    Settings,
    Thread(ThreadId),
    Reply(ThreadId),
}

impl Route {
    /// Screens shown in the bottom bar.
    pub const TOP_LEVEL: [Route; 4] = [Route::Home, Route::Alerts, Route::News, Route::Settings];

    /// Route to the forum rules thread.
    pub fn rules_thread() -> Self {
        Route::Thread(RULES_THREAD)
    }

    pub fn is_top_level(&self) -> bool {
        Self::TOP_LEVEL.contains(self)
    }

    /// Thread parameter carried by the route, if any.
    pub fn thread_id(&self) -> Option<ThreadId> {
        match self {
            Route::Thread(id) | Route::Reply(id) => Some(*id),
            _ => None,
        }
    }

    /// Route string, e.g. `home` or `thread/42`.
    pub fn path(&self) -> String {
        match self {
            Route::Login => "login".to_string(),
            Route::Home => "home".to_string(),
            Route::Alerts => "alerts".to_string(),
            Route::News => "news".to_string(),
            Route::Settings => "settings".to_string(),
            Route::Thread(id) => format!("thread/{}", id),
            Route::Reply(id) => format!("reply/{}", id),
        }
    }

    /// Parse a route string.
    ///
    /// Thread and reply routes need a positive integer id; anything else
    /// is rejected here so the core never sees an invalid id.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim().trim_matches('/');
        let (name, param) = match input.split_once('/') {
            Some((name, param)) => (name, Some(param)),
            None => (input, None),
        };

        let simple = |route: Route| match param {
            None => Ok(route),
            Some(_) => Err(ValidationError::UnknownRoute(input.to_string())),
        };

        match name {
            "login" => simple(Route::Login),
            "home" => simple(Route::Home),
            "alerts" => simple(Route::Alerts),
            "news" => simple(Route::News),
            "settings" => simple(Route::Settings),
            "thread" => Ok(Route::Thread(thread_param(name, param)?)),
            "reply" => Ok(Route::Reply(thread_param(name, param)?)),
            _ => Err(ValidationError::UnknownRoute(input.to_string())),
        }
    }
}

fn thread_param(route: &str, param: Option<&str>) -> Result<ThreadId, ValidationError> {
    let raw = param
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ValidationError::MissingRouteParam(format!("{}: thread id", route)))?;
    raw.parse()
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

/// Pick the first screen: home when a token is present, login otherwise.
pub fn initial_route(session: &SessionStore) -> Route {
    if session.is_authenticated() {
        Route::Home
    } else {
        Route::Login
    }
}
