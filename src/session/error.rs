//! Session error types

use thiserror::Error;

/// Errors raised while setting up session monitoring
///
/// The countdown transitions themselves never fail; only configuration and
/// registry lookups can.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Timeout/warning pair rejected
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),

    /// No monitor registered under this id
    #[error("Session not found: {0}")]
    NotFound(String),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SessionError::NotFound("abc".to_string());
        assert_eq!(err.to_string(), "Session not found: abc");
    }
}
