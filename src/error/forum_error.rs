//! Unified error type for the sync core.

use std::fmt;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::validation::ValidationError;
use crate::traits::SessionError;

/// Unified error type for forum operations.
///
/// Every failure is scoped to the operation that produced it; none of these
/// are fatal to the process.
#[derive(Debug, Clone, PartialEq)]
pub enum ForumError {
    /// Transport, timeout, non-2xx or malformed payload.
    Network(NetworkError),

    /// Input rejected before any network call.
    Validation(ValidationError),

    /// Session storage failure.
    Session(SessionError),
}

impl ForumError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ForumError::Network(NetworkError::HttpStatus { status: 401, .. }) => ErrorCategory::Auth,
            ForumError::Network(NetworkError::HttpStatus { status, .. }) if *status >= 500 => {
                ErrorCategory::Server
            }
            ForumError::Network(NetworkError::InvalidResponse { .. }) => ErrorCategory::Server,
            ForumError::Network(NetworkError::HttpStatus { .. }) => ErrorCategory::User,
            ForumError::Network(_) => ErrorCategory::Network,
            ForumError::Validation(_) => ErrorCategory::User,
            ForumError::Session(_) => ErrorCategory::System,
        }
    }

    /// Check if this error is transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            ForumError::Network(err) => err.is_retryable(),
            ForumError::Validation(_) | ForumError::Session(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ForumError::Network(err) => err.user_message(),
            ForumError::Validation(err) => err.user_message(),
            ForumError::Session(err) => format!("Could not access the saved session: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ForumError::Network(err) => err.error_code(),
            ForumError::Validation(err) => err.error_code(),
            ForumError::Session(_) => "E_SESSION",
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// Check if this error means the session token is no longer accepted.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            ForumError::Network(NetworkError::HttpStatus { status: 401, .. })
        )
    }
}

impl fmt::Display for ForumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForumError::Network(err) => write!(f, "{}", err),
            ForumError::Validation(err) => write!(f, "{}", err),
            ForumError::Session(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ForumError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ForumError::Network(err) => Some(err),
            ForumError::Validation(err) => Some(err),
            ForumError::Session(err) => Some(err),
        }
    }
}

impl From<NetworkError> for ForumError {
    fn from(err: NetworkError) -> Self {
        ForumError::Network(err)
    }
}

impl From<ValidationError> for ForumError {
    fn from(err: ValidationError) -> Self {
        ForumError::Validation(err)
    }
}

impl From<SessionError> for ForumError {
    fn from(err: SessionError) -> Self {
        ForumError::Session(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_categories() {
        let timeout: ForumError = NetworkError::Timeout {
            operation: "thread".to_string(),
        }
        .into();
        assert_eq!(timeout.category(), ErrorCategory::Network);
        assert!(timeout.is_retryable());

        let server: ForumError = NetworkError::HttpStatus {
            status: 502,
            message: String::new(),
        }
        .into();
        assert_eq!(server.category(), ErrorCategory::Server);

        let not_found: ForumError = NetworkError::HttpStatus {
            status: 404,
            message: String::new(),
        }
        .into();
        assert_eq!(not_found.category(), ErrorCategory::User);
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_reauth_detection() {
        let unauthorized: ForumError = NetworkError::HttpStatus {
            status: 401,
            message: "token expired".to_string(),
        }
        .into();
        assert!(unauthorized.requires_reauth());
        assert_eq!(unauthorized.category(), ErrorCategory::Auth);

        let forbidden: ForumError = NetworkError::HttpStatus {
            status: 403,
            message: String::new(),
        }
        .into();
        assert!(!forbidden.requires_reauth());
    }

    #[test]
    fn test_validation_is_user_error() {
        let err: ForumError = ValidationError::BlankReplyBody.into();
        assert_eq!(err.category(), ErrorCategory::User);
        assert_eq!(err.error_code(), "E_VAL_BLANK");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_session_error() {
        let err: ForumError = SessionError::Io("disk full".to_string()).into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert!(std::error::Error::source(&err).is_some());
    }
}
