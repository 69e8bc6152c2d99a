//! OpenAI provider implementation over transport and shared models.

use std::sync::Arc;

use pcommon::GenerationOptions;

use crate::{
    ModelPolicy, ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture,
    ProviderId, SecureCredentialManager,
};

use super::auth::resolve_openai_auth;
use super::transport::OpenAiTransport;
use super::types::{OpenAiMessage, OpenAiRequest};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Sampling applied to every completion unless the request sets a field itself.
pub fn default_sampling() -> GenerationOptions {
    GenerationOptions::default()
        .with_max_tokens(1000)
        .with_temperature(0.7)
        .with_top_p(0.95)
        .with_frequency_penalty(0.0)
        .with_presence_penalty(0.0)
}

#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn OpenAiTransport>,
    default_model: String,
    sampling: GenerationOptions,
}

impl OpenAiProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn OpenAiTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
            default_model: DEFAULT_OPENAI_MODEL.to_string(),
            sampling: default_sampling(),
        }
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_sampling(mut self, sampling: GenerationOptions) -> Self {
        self.sampling = sampling;
        self
    }

    pub(crate) fn build_openai_request(&self, request: ModelRequest) -> OpenAiRequest {
        let options = request.options.with_defaults(self.sampling);

        OpenAiRequest {
            model: request.model,
            messages: request
                .messages
                .into_iter()
                .map(OpenAiMessage::from)
                .collect(),
            temperature: options.temperature,
            top_p: options.top_p,
            max_tokens: options.max_tokens,
            frequency_penalty: options.frequency_penalty,
            presence_penalty: options.presence_penalty,
        }
    }
}

impl ModelProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn model_policy(&self) -> ModelPolicy {
        ModelPolicy::VerifyWithFallback
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_openai_auth(&self.credentials)?;
            let openai_request = self.build_openai_request(request);
            let response = self.transport.complete(openai_request, auth).await?;
            Ok(response.into_model_response())
        })
    }

    fn list_models<'a>(&'a self) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move {
            let auth = resolve_openai_auth(&self.credentials)?;
            self.transport.list_models(auth).await
        })
    }
}
