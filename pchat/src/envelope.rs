//! Success and failure envelope construction.
//!
//! ```rust
//! use pchat::{ChatError, ChatResponse, ChatStatus};
//!
//! let ok = ChatResponse::success("abc", "gemma2:2b", "hi there");
//! assert_eq!(ok.status, ChatStatus::Completed);
//!
//! let failed = ChatResponse::failure("abc", "gemma2:2b", &ChatError::model_not_set());
//! assert_eq!(failed.status, ChatStatus::Error);
//! assert!(failed.is_client_error());
//! ```

use crate::{ChatError, ChatResponse, ChatStatus};

impl ChatResponse {
    pub fn success(id: impl Into<String>, model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            response_text: text.into(),
            status: ChatStatus::Completed,
            error: None,
            substituted_from: None,
            error_kind: None,
        }
    }

    pub fn failure(id: impl Into<String>, model: impl Into<String>, error: &ChatError) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            response_text: String::new(),
            status: ChatStatus::Error,
            error: Some(error.message.clone()),
            substituted_from: None,
            error_kind: Some(error.kind),
        }
    }

    pub fn with_substituted_from(mut self, requested: Option<String>) -> Self {
        self.substituted_from = requested;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == ChatStatus::Completed
    }

    pub fn is_client_error(&self) -> bool {
        self.error_kind.is_some_and(|kind| kind.is_client_error())
    }
}
