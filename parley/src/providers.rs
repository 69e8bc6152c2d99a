//! Stable provider construction surface for facade consumers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::{BackendConfig, ModelProvider, ProviderError, ProviderId};

/// Shared HTTP client for one backend; `timeout` bounds each outbound call.
pub fn build_http_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))
}

pub fn build_provider(
    provider_id: ProviderId,
    config: &BackendConfig,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let http = build_http_client(config.timeout)?;

    match provider_id {
        ProviderId::Ollama => build_ollama_provider(config, http),
        ProviderId::OpenAi => build_openai_provider(config, http),
    }
}

#[cfg(feature = "provider-ollama")]
fn build_ollama_provider(
    config: &BackendConfig,
    http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use pprovider::adapters::ollama::OllamaProvider;

    let transport =
        Arc::new(OllamaProvider::default_http_transport(http).with_base_url(&config.base_url));
    Ok(Arc::new(
        OllamaProvider::new(transport).with_default_model(&config.default_model),
    ))
}

#[cfg(not(feature = "provider-ollama"))]
fn build_ollama_provider(
    _config: &BackendConfig,
    _http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-ollama feature is not enabled on parley",
    ))
}

#[cfg(feature = "provider-openai")]
fn build_openai_provider(
    config: &BackendConfig,
    http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use pprovider::adapters::openai::{OpenAiHttpTransport, OpenAiProvider};

    let api_key = config
        .api_key
        .as_ref()
        .ok_or_else(|| ProviderError::authentication("no OpenAI API key configured"))?;

    let credentials = Arc::new(crate::SecureCredentialManager::new());
    credentials.set_openai_api_key(api_key.expose())?;

    let transport = Arc::new(OpenAiHttpTransport::new(http).with_base_url(&config.base_url));
    Ok(Arc::new(
        OpenAiProvider::new(credentials, transport).with_default_model(&config.default_model),
    ))
}

#[cfg(not(feature = "provider-openai"))]
fn build_openai_provider(
    _config: &BackendConfig,
    _http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-openai feature is not enabled on parley",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[cfg(feature = "provider-ollama")]
    #[test]
    fn ollama_provider_uses_configured_model() {
        let config = BackendConfig::new("http://localhost:11434", "llama3.2");
        let provider = build_provider(ProviderId::Ollama, &config).expect("provider builds");

        assert_eq!(provider.id(), ProviderId::Ollama);
        assert_eq!(provider.default_model(), "llama3.2");
    }

    #[cfg(feature = "provider-openai")]
    #[test]
    fn openai_provider_requires_api_key() {
        let config = BackendConfig::new("https://api.openai.com/v1", "gpt-3.5-turbo");

        let error = match build_provider(ProviderId::OpenAi, &config) {
            Ok(_) => panic!("missing key should fail"),
            Err(error) => error,
        };
        assert_eq!(error.kind, ProviderErrorKind::Authentication);

        let provider = build_provider(ProviderId::OpenAi, &config.with_api_key("sk-test"))
            .expect("provider builds");
        assert_eq!(provider.id(), ProviderId::OpenAi);
        assert_eq!(provider.default_model(), "gpt-3.5-turbo");
    }
}
