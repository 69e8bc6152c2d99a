//! Gateway error type.
//!
//! Handlers return `Result<T, GatewayError>`; every variant renders as a JSON
//! `{"error": "..."}` body. Internal detail is logged and never sent to callers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parley::ChatError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The route names a backend that is unknown or not configured.
    #[error("unknown backend: {0}")]
    UnknownBackend(String),

    #[error("{0}")]
    NotFound(String),

    #[error("chat error: {0}")]
    Chat(#[from] ChatError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            GatewayError::UnknownBackend(_) => (StatusCode::NOT_FOUND, self.to_string()),
            GatewayError::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            GatewayError::Chat(chat_error) if chat_error.is_client_error() => {
                (StatusCode::BAD_REQUEST, chat_error.message.clone())
            }
            GatewayError::Chat(chat_error) => {
                error!(error = %chat_error, "chat request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_class() {
        let cases = [
            (
                GatewayError::UnknownBackend("bard".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                GatewayError::NotFound("chat not found".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                GatewayError::from(ChatError::invalid_request("empty prompt")),
                StatusCode::BAD_REQUEST,
            ),
            (
                GatewayError::from(ChatError::internal("lock poisoned")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
