//! Shared provider error kinds and error value helpers.
//!
//! ```rust
//! use pprovider::{ProviderError, ProviderErrorKind};
//!
//! let auth = ProviderError::authentication("bad key").with_status(401);
//! assert_eq!(auth.kind, ProviderErrorKind::Authentication);
//! assert_eq!(auth.status, Some(401));
//!
//! let malformed = ProviderError::malformed_response("no choices");
//! assert!(!malformed.is_transport_failure());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Authentication,
    RateLimited,
    InvalidRequest,
    Rejected,
    Timeout,
    Transport,
    Unavailable,
    MalformedResponse,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Authentication, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimited, message)
    }

    /// The request was refused locally before any network call.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidRequest, message)
    }

    /// The backend answered with a client-error status.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Rejected, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message)
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::MalformedResponse, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message)
    }

    /// True when the backend could not be reached or refused the call.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self.kind,
            ProviderErrorKind::Authentication
                | ProviderErrorKind::RateLimited
                | ProviderErrorKind::Rejected
                | ProviderErrorKind::Timeout
                | ProviderErrorKind::Transport
                | ProviderErrorKind::Unavailable
        )
    }

    /// Classifies a non-success HTTP status from a backend.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let error = match status {
            401 | 403 => Self::authentication(message),
            429 => Self::rate_limited(message),
            408 | 504 => Self::timeout(message),
            400 | 404 | 422 => Self::rejected(message),
            502 | 503 => Self::unavailable(message),
            _ => Self::transport(message),
        };

        error.with_status(status)
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{:?} (http {status}): {}", self.kind, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_classifies_backend_statuses() {
        assert_eq!(
            ProviderError::from_status(401, "nope").kind,
            ProviderErrorKind::Authentication
        );
        assert_eq!(
            ProviderError::from_status(429, "slow down").kind,
            ProviderErrorKind::RateLimited
        );
        assert_eq!(
            ProviderError::from_status(504, "late").kind,
            ProviderErrorKind::Timeout
        );
        assert_eq!(
            ProviderError::from_status(404, "model not found").kind,
            ProviderErrorKind::Rejected
        );
        assert_eq!(
            ProviderError::from_status(503, "down").kind,
            ProviderErrorKind::Unavailable
        );

        let other = ProviderError::from_status(500, "boom");
        assert_eq!(other.kind, ProviderErrorKind::Transport);
        assert_eq!(other.status, Some(500));
        assert!(other.is_transport_failure());
    }

    #[test]
    fn local_and_payload_errors_are_not_transport_failures() {
        assert!(!ProviderError::invalid_request("bad").is_transport_failure());
        assert!(!ProviderError::malformed_response("empty").is_transport_failure());
        assert!(!ProviderError::other("poisoned").is_transport_failure());
    }

    #[test]
    fn display_includes_status_when_known() {
        let error = ProviderError::transport("boom").with_status(500);
        assert_eq!(error.to_string(), "Transport (http 500): boom");
        assert_eq!(ProviderError::timeout("late").to_string(), "Timeout: late");
    }
}
