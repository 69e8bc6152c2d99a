//! Common imports for most parley applications.

pub use crate::{
    BackendConfig, ChatError, ChatErrorKind, ChatMessage, ChatRequest, ChatResponse,
    ChatService, ChatStatus, ConversationHooks, GatewayConfig, GatewayRuntime, GenerateRequest,
    ModelProvider, ProviderError, ProviderId, Role, SessionId,
};
pub use crate::{
    assistant_message, build_provider, chat, chat_service, chat_service_with_hooks,
    default_hooks, generate, generate_with_model, parse_provider_id, user_message,
};
