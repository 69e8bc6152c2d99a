//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use pprovider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    /// The session has no model and none could be determined.
    ModelNotSet,
    InvalidRequest,
    BackendUnavailable,
    MalformedBackendResponse,
    Internal,
}

impl ChatErrorKind {
    /// Client errors are refused before any backend call.
    pub fn is_client_error(self) -> bool {
        matches!(self, Self::ModelNotSet | Self::InvalidRequest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn model_not_set() -> Self {
        Self::new(ChatErrorKind::ModelNotSet, "model not set")
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::BackendUnavailable, message)
    }

    pub fn malformed_backend_response(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::MalformedBackendResponse, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Internal, message)
    }

    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        let message = value.to_string();
        match value.kind {
            ProviderErrorKind::Authentication
            | ProviderErrorKind::RateLimited
            | ProviderErrorKind::Rejected
            | ProviderErrorKind::Timeout
            | ProviderErrorKind::Transport
            | ProviderErrorKind::Unavailable => ChatError::backend_unavailable(message),
            ProviderErrorKind::MalformedResponse => ChatError::malformed_backend_response(message),
            ProviderErrorKind::InvalidRequest | ProviderErrorKind::Other => {
                ChatError::internal(message)
            }
        }
    }
}
