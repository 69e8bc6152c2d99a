use pcommon::BoxFuture;

use crate::{ModelPolicy, ModelRequest, ModelResponse, ProviderError, ProviderId};

pub type ProviderFuture<'a, T> = BoxFuture<'a, T>;

/// One chat backend: translates a conversation to its wire format and performs the call.
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Model used when a caller does not name one, or when a requested model is unavailable.
    fn default_model(&self) -> &str;

    fn model_policy(&self) -> ModelPolicy {
        ModelPolicy::TrustRequested
    }

    /// Sends the full history in `request` and returns the first assistant reply.
    /// Exactly one outbound call is made; failures are never retried here.
    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;

    fn list_models<'a>(&'a self) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>>;
}
