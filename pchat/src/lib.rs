//! Conversation orchestration over model providers.
//!
//! ```rust
//! use pchat::{ChatResponse, ChatStatus, GenerateRequest};
//!
//! let request = GenerateRequest::new("hello").with_model("gemma2:2b");
//! assert_eq!(request.model.as_deref(), Some("gemma2:2b"));
//!
//! let envelope = ChatResponse::success("abc", "gemma2:2b", "hi");
//! assert_eq!(envelope.status, ChatStatus::Completed);
//! ```

mod envelope;
mod error;
mod hooks;
mod resolver;
mod service;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatMessage, ChatRequest, ChatResponse, ChatService,
        ChatServiceBuilder, ChatSession, ChatStatus, ConversationHooks, GenerateRequest,
        InMemorySessionStore, ModelResolution, ModelResolver, NoopConversationHooks,
        SessionStore,
    };
    pub use pcommon::{GenerationOptions, SessionId};
}

pub use error::{ChatError, ChatErrorKind};
pub use hooks::{ConversationHooks, NoopConversationHooks};
pub use pcommon::{GenerationOptions, SessionId};
pub use resolver::{ModelResolution, ModelResolver};
pub use service::{ChatService, ChatServiceBuilder};
pub use store::{
    ChatFuture, InMemorySessionStore, SessionCell, SessionHandle, SessionStore, SessionTurn,
};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, ChatSession, ChatStatus, GenerateRequest,
};
