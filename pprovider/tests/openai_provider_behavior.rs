#![cfg(feature = "provider-openai")]

use std::sync::{Arc, Mutex};

use pprovider::adapters::openai::{
    OpenAiAuth, OpenAiFinishReason, OpenAiProvider, OpenAiRequest, OpenAiResponse,
    OpenAiTransport, OpenAiUsage,
};
use pprovider::{
    Message, ModelPolicy, ModelProvider, ModelRequest, ProviderError, ProviderErrorKind,
    ProviderFuture, ProviderId, Role, SecureCredentialManager, StopReason,
};

#[derive(Debug, Default)]
struct FakeTransport {
    captured_key: Mutex<Option<String>>,
    captured_request: Mutex<Option<OpenAiRequest>>,
    fail_with: Option<ProviderError>,
}

impl OpenAiTransport for FakeTransport {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            *self.captured_request.lock().expect("request lock") = Some(request);
            let OpenAiAuth::ApiKey(key) = auth;
            *self.captured_key.lock().expect("auth lock") = Some(key.expose().to_string());

            if let Some(error) = &self.fail_with {
                return Err(error.clone());
            }

            Ok(OpenAiResponse {
                model: "gpt-4o-mini".to_string(),
                content: "hello world".to_string(),
                finish_reason: OpenAiFinishReason::Stop,
                usage: OpenAiUsage {
                    prompt_tokens: 7,
                    completion_tokens: 3,
                    total_tokens: 10,
                },
            })
        })
    }

    fn list_models<'a>(
        &'a self,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move {
            let OpenAiAuth::ApiKey(key) = auth;
            *self.captured_key.lock().expect("auth lock") = Some(key.expose().to_string());
            Ok(vec!["gpt-4o-mini".to_string(), "gpt-3.5-turbo".to_string()])
        })
    }
}

fn credentials_with_key() -> Arc<SecureCredentialManager> {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials
        .set_openai_api_key("sk-live-123")
        .expect("key should set");
    credentials
}

#[tokio::test]
async fn complete_maps_openai_response_to_provider_response() {
    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiProvider::new(credentials_with_key(), transport.clone());
    let request = ModelRequest::new(
        "gpt-4o",
        vec![
            Message::new(Role::User, "hi"),
            Message::new(Role::Assistant, "hello"),
            Message::new(Role::User, "again"),
        ],
    );

    let response = provider
        .complete(request)
        .await
        .expect("completion should succeed");
    assert_eq!(response.provider, ProviderId::OpenAi);
    assert_eq!(response.content, "hello world");
    assert_eq!(response.stop_reason, StopReason::EndTurn);
    assert_eq!(response.usage.total_tokens, 10);

    let key = transport
        .captured_key
        .lock()
        .expect("auth lock")
        .clone()
        .expect("auth should be captured");
    assert_eq!(key, "sk-live-123");

    let captured_request = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request should be captured");
    assert_eq!(captured_request.model, "gpt-4o");
    assert_eq!(captured_request.messages.len(), 3);
    assert_eq!(captured_request.max_tokens, Some(1000));
}

#[tokio::test]
async fn missing_openai_credentials_returns_auth_error() {
    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiProvider::new(Arc::new(SecureCredentialManager::new()), transport.clone());
    let request = ModelRequest::new("gpt-4o-mini", vec![Message::new(Role::User, "hi")]);

    let error = provider
        .complete(request)
        .await
        .expect_err("missing creds should fail");
    assert_eq!(error.kind, ProviderErrorKind::Authentication);
    assert_eq!(error.message, "no OpenAI API key configured");
    assert!(transport.captured_request.lock().expect("lock").is_none());
}

#[tokio::test]
async fn invalid_request_is_rejected_before_transport() {
    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiProvider::new(credentials_with_key(), transport.clone());
    let request = ModelRequest::new("gpt-4o-mini", Vec::new());

    let error = provider
        .complete(request)
        .await
        .expect_err("empty history should fail");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
    assert!(transport.captured_request.lock().expect("lock").is_none());
}

#[tokio::test]
async fn transport_errors_pass_through_unchanged() {
    let transport = Arc::new(FakeTransport {
        fail_with: Some(ProviderError::from_status(503, "overloaded")),
        ..FakeTransport::default()
    });
    let provider = OpenAiProvider::new(credentials_with_key(), transport);
    let request = ModelRequest::new("gpt-4o-mini", vec![Message::new(Role::User, "hi")]);

    let error = provider.complete(request).await.expect_err("should fail");
    assert_eq!(error.kind, ProviderErrorKind::Unavailable);
    assert_eq!(error.status, Some(503));
}

#[tokio::test]
async fn provider_verifies_models_and_lists_through_transport() {
    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiProvider::new(credentials_with_key(), transport.clone())
        .with_default_model("gpt-4o-mini");

    assert_eq!(provider.model_policy(), ModelPolicy::VerifyWithFallback);
    assert_eq!(provider.default_model(), "gpt-4o-mini");

    let models = provider.list_models().await.expect("listing should succeed");
    assert_eq!(models, vec!["gpt-4o-mini", "gpt-3.5-turbo"]);
    assert_eq!(
        transport.captured_key.lock().expect("lock").as_deref(),
        Some("sk-live-123")
    );
}
