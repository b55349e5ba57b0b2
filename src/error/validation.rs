//! Input validation errors.
//!
//! These are raised before any network call is made.

use thiserror::Error;

/// Rejected input at the core or navigation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Reply body was empty or whitespace only
    #[error("Reply body must not be blank")]
    BlankReplyBody,

    /// Thread id was zero, negative or out of range
    #[error("Invalid thread id: {0}")]
    InvalidThreadId(i64),

    /// Thread id text that is not an integer
    #[error("Malformed thread id: '{0}'")]
    MalformedThreadId(String),

    /// A route required a parameter that was absent
    #[error("Missing route parameter: {0}")]
    MissingRouteParam(String),

    /// Route string did not match any known screen
    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}

impl ValidationError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::BlankReplyBody => "Write something before posting.".to_string(),
            ValidationError::InvalidThreadId(_)
            | ValidationError::MalformedThreadId(_)
            | ValidationError::MissingRouteParam(_) => {
                "That thread link is not valid.".to_string()
            }
            ValidationError::UnknownRoute(route) => format!("Unknown screen '{}'.", route),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::BlankReplyBody => "E_VAL_BLANK",
            ValidationError::InvalidThreadId(_) | ValidationError::MalformedThreadId(_) => {
                "E_VAL_THREAD_ID"
            }
            ValidationError::MissingRouteParam(_) => "E_VAL_ROUTE_PARAM",
            ValidationError::UnknownRoute(_) => "E_VAL_ROUTE",
        }
    }
}
