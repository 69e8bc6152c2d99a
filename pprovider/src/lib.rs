//! Provider adapters that translate conversations to backend wire formats.
//!
//! ```rust
//! use pprovider::{Message, ModelRequest, ProviderId, Role};
//!
//! let request = ModelRequest::builder("gemma2:2b")
//!     .message(Message::new(Role::User, "hello"))
//!     .build()
//!     .expect("request should be valid");
//!
//! assert_eq!(request.messages.len(), 1);
//! assert_eq!(ProviderId::Ollama.to_string(), "ollama");
//! ```

mod credentials;
mod error;
mod model;
mod provider;
mod registry;

pub mod adapters;
pub mod prelude;

pub use credentials::{SecretString, SecureCredentialManager};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    Message, ModelPolicy, ModelRequest, ModelRequestBuilder, ModelResponse, ProviderId, Role,
    StopReason, TokenUsage,
};
pub use pcommon::GenerationOptions;
pub use provider::{ModelProvider, ProviderFuture};
pub use registry::ProviderRegistry;
