//! Ollama provider over the native `/api/chat` and `/api/tags` endpoints.

use std::sync::Arc;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::adapters::http::{map_send_error, truncate};
use crate::{
    Message, ModelPolicy, ModelProvider, ModelRequest, ModelResponse, ProviderError,
    ProviderFuture, ProviderId, StopReason, TokenUsage,
};

pub const OLLAMA_HOST_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "gemma2:2b";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OllamaChatRequest {
    pub model: String,
    pub messages: Vec<OllamaMessage>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OllamaOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OllamaMessage {
    pub role: String,
    pub content: String,
}

impl From<Message> for OllamaMessage {
    fn from(value: Message) -> Self {
        Self {
            role: value.role.as_str().to_string(),
            content: value.content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct OllamaChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub message: Option<OllamaMessage>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

impl OllamaChatResponse {
    fn into_model_response(self, requested_model: String) -> Result<ModelResponse, ProviderError> {
        let message = self
            .message
            .ok_or_else(|| ProviderError::malformed_response("empty/invalid response from backend"))?;

        let stop_reason = match self.done_reason.as_deref() {
            Some("stop") => StopReason::EndTurn,
            Some("length") => StopReason::MaxTokens,
            None if self.done => StopReason::EndTurn,
            _ => StopReason::Other,
        };

        let input_tokens = self.prompt_eval_count.unwrap_or(0);
        let output_tokens = self.eval_count.unwrap_or(0);

        Ok(ModelResponse {
            provider: ProviderId::Ollama,
            model: self.model.unwrap_or(requested_model),
            content: message.content,
            stop_reason,
            usage: TokenUsage {
                input_tokens,
                output_tokens,
                total_tokens: input_tokens.saturating_add(output_tokens),
            },
        })
    }
}

pub trait OllamaTransport: Send + Sync + std::fmt::Debug {
    fn chat<'a>(
        &'a self,
        request: OllamaChatRequest,
    ) -> ProviderFuture<'a, Result<OllamaChatResponse, ProviderError>>;

    fn tags<'a>(&'a self) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct OllamaHttpTransport {
    client: Client,
    base_url: String,
}

impl OllamaHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: OLLAMA_HOST_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<OllamaErrorBody>(&body)
            .map(|parsed| parsed.error)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    format!("Ollama request failed with status {status}")
                } else {
                    truncate(&body, 4096)
                }
            });

        ProviderError::from_status(status.as_u16(), message)
    }
}

impl OllamaTransport for OllamaHttpTransport {
    fn chat<'a>(
        &'a self,
        request: OllamaChatRequest,
    ) -> ProviderFuture<'a, Result<OllamaChatResponse, ProviderError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.endpoint("api/chat"))
                .json(&request)
                .send()
                .await
                .map_err(map_send_error)?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let body = response.text().await.map_err(map_send_error)?;
            serde_json::from_str::<OllamaChatResponse>(&body)
                .map_err(|err| ProviderError::malformed_response(err.to_string()))
        })
    }

    fn tags<'a>(&'a self) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.endpoint("api/tags"))
                .send()
                .await
                .map_err(map_send_error)?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed = response
                .json::<OllamaTagsResponse>()
                .await
                .map_err(|err| ProviderError::malformed_response(err.to_string()))?;

            let mut names = parsed
                .models
                .into_iter()
                .map(|model| model.name)
                .collect::<Vec<_>>();
            names.sort();
            Ok(names)
        })
    }
}

#[derive(Debug, Clone)]
pub struct OllamaProvider {
    transport: Arc<dyn OllamaTransport>,
    default_model: String,
}

impl OllamaProvider {
    pub fn new(transport: Arc<dyn OllamaTransport>) -> Self {
        Self {
            transport,
            default_model: DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn default_http_transport(client: Client) -> OllamaHttpTransport {
        OllamaHttpTransport::new(client)
    }

    pub(crate) fn build_request(&self, request: ModelRequest) -> OllamaChatRequest {
        let options = if request.options.is_empty() {
            None
        } else {
            Some(OllamaOptions {
                temperature: request.options.temperature,
                top_p: request.options.top_p,
                num_predict: request.options.max_tokens,
                frequency_penalty: request.options.frequency_penalty,
                presence_penalty: request.options.presence_penalty,
            })
        };

        OllamaChatRequest {
            model: request.model,
            messages: request
                .messages
                .into_iter()
                .map(OllamaMessage::from)
                .collect(),
            stream: false,
            options,
        }
    }
}

impl ModelProvider for OllamaProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Ollama
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn model_policy(&self) -> ModelPolicy {
        ModelPolicy::TrustRequested
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let model = request.model.clone();
            let ollama_request = self.build_request(request);
            let response = self.transport.chat(ollama_request).await?;
            response.into_model_response(model)
        })
    }

    fn list_models<'a>(&'a self) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>> {
        self.transport.tags()
    }
}

#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaModelTag>,
}

#[derive(Debug, Deserialize)]
struct OllamaModelTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorBody {
    error: String,
}
