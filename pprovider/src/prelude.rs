//! Common `pprovider` imports for downstream crates.

pub use crate::{
    Message, ModelPolicy, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse,
    ProviderError, ProviderErrorKind, ProviderFuture, ProviderId, ProviderRegistry, Role,
    SecretString, SecureCredentialManager, StopReason, TokenUsage,
};
pub use pcommon::{BoxFuture, GenerationOptions};
