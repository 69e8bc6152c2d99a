//! Unified facade over the parley workspace crates.
//!
//! This crate is the single dependency for applications that embed the gateway. It
//! re-exports the core crates and adds configuration loading, provider construction and
//! the per-backend runtime.
//!
//! ```rust
//! use parley::{GatewayRuntime, ProviderId};
//!
//! let runtime = GatewayRuntime::new();
//! assert!(runtime.service(ProviderId::Ollama).is_none());
//! ```

pub mod config;
pub mod prelude;
pub mod providers;
pub mod runtime;
pub mod util;

pub use pchat;
pub use pcommon;
pub use pobserve;
pub use pprovider;

pub use pchat::{
    ChatError, ChatErrorKind, ChatMessage, ChatRequest, ChatResponse, ChatService,
    ChatServiceBuilder, ChatSession, ChatStatus, ConversationHooks, GenerateRequest,
    InMemorySessionStore, ModelResolution, ModelResolver, NoopConversationHooks, SessionStore,
};
pub use pcommon::{BoxFuture, GenerationOptions, SessionId};
pub use pobserve::{
    MetricsObservabilityHooks, ObservabilityHooks, SafeConversationHooks,
    TracingObservabilityHooks,
};
pub use pprovider::{
    Message, ModelPolicy, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse,
    ProviderError, ProviderErrorKind, ProviderFuture, ProviderId, ProviderRegistry, Role,
    SecretString, SecureCredentialManager, StopReason, TokenUsage,
};

pub use config::{BackendConfig, GatewayConfig};
pub use providers::{build_http_client, build_provider};
pub use runtime::{GatewayRuntime, chat_service, chat_service_with_hooks, default_hooks};
pub use util::{
    assistant_message, chat, generate, generate_with_model, parse_provider_id, user_message,
};
