//! Axum router construction.
//!
//! Every backend is served under `/llm/{backend}`; a session id created on one backend is
//! unknown to the others.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use parley::{ChatMessage, ChatRequest, ChatResponse, GenerateRequest, SessionId};
use serde_json::{Value, json};

use crate::error::GatewayError;
use crate::state::AppState;

pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/llm/{backend}/generate", post(generate))
        .route("/llm/{backend}/chat", post(chat))
        .route("/llm/{backend}/chat/{id}", get(history))
        .route("/llm/{backend}/models", get(models))
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let backends = state
        .backends()
        .into_iter()
        .map(|backend| backend.to_string())
        .collect::<Vec<_>>();
    Json(json!({ "status": "ok", "backends": backends }))
}

async fn generate(
    State(state): State<Arc<AppState>>,
    Path(backend): Path<String>,
    Json(request): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<ChatResponse>), GatewayError> {
    let service = state.service(&backend)?;
    Ok(envelope(service.generate(request).await))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Path(backend): Path<String>,
    Json(request): Json<ChatRequest>,
) -> Result<(StatusCode, Json<ChatResponse>), GatewayError> {
    let service = state.service(&backend)?;
    Ok(envelope(service.chat(request).await))
}

async fn history(
    State(state): State<Arc<AppState>>,
    Path((backend, id)): Path<(String, String)>,
) -> Result<Json<Vec<ChatMessage>>, GatewayError> {
    let service = state.service(&backend)?;
    let messages = service.history(&SessionId::from(id)).await?;
    if messages.is_empty() {
        return Err(GatewayError::NotFound("chat not found".to_string()));
    }
    Ok(Json(messages))
}

async fn models(
    State(state): State<Arc<AppState>>,
    Path(backend): Path<String>,
) -> Result<Json<Vec<String>>, GatewayError> {
    let service = state.service(&backend)?;
    Ok(Json(service.list_models().await))
}

/// Failed turns still return the envelope, under a status matching the error class.
fn envelope(response: ChatResponse) -> (StatusCode, Json<ChatResponse>) {
    let status = if response.is_completed() {
        StatusCode::OK
    } else if response.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use parley::{
        GatewayRuntime, ModelProvider, ModelRequest, ModelResponse, NoopConversationHooks,
        ProviderError, ProviderFuture, ProviderId, ProviderRegistry, StopReason, TokenUsage,
    };
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Default)]
    struct FakeProvider {
        fail_with: Mutex<Option<ProviderError>>,
    }

    impl ModelProvider for FakeProvider {
        fn id(&self) -> ProviderId {
            ProviderId::Ollama
        }

        fn default_model(&self) -> &str {
            "gemma2:2b"
        }

        fn complete<'a>(
            &'a self,
            request: ModelRequest,
        ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
            Box::pin(async move {
                if let Some(error) = self.fail_with.lock().expect("fail lock").clone() {
                    return Err(error);
                }

                let prompt = request
                    .messages
                    .last()
                    .map(|message| message.content.clone())
                    .unwrap_or_default();
                Ok(ModelResponse {
                    provider: ProviderId::Ollama,
                    model: request.model,
                    content: format!("echo: {prompt}"),
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage::default(),
                })
            })
        }

        fn list_models<'a>(&'a self) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>> {
            Box::pin(async { Ok(vec!["gemma2:2b".to_string(), "llama3.2".to_string()]) })
        }
    }

    fn app_with(provider: FakeProvider) -> Router {
        let mut providers = ProviderRegistry::new();
        providers.register(provider);
        let runtime = GatewayRuntime::from_registry(&providers, Arc::new(NoopConversationHooks));
        build(Arc::new(AppState::new(runtime)))
    }

    fn app() -> Router {
        app_with(FakeProvider::default())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn health_lists_registered_backends() {
        let (status, body) = send(app(), get_request("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok", "backends": ["ollama"] }));
    }

    #[tokio::test]
    async fn generate_returns_completed_envelope() {
        let (status, body) = send(
            app(),
            post_json("/llm/ollama/generate", json!({ "prompt": "hello" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Completed");
        assert_eq!(body["model"], "gemma2:2b");
        assert_eq!(body["response"], "echo: hello");
        assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn blank_prompt_is_bad_request_with_envelope() {
        let (status, body) = send(
            app(),
            post_json("/llm/ollama/chat", json!({ "id": "abc", "prompt": "  " })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "Error");
        assert_eq!(body["id"], "abc");
    }

    #[tokio::test]
    async fn backend_failure_is_server_error_with_envelope() {
        let provider = FakeProvider::default();
        *provider.fail_with.lock().expect("fail lock") =
            Some(ProviderError::from_status(503, "model is loading"));

        let (status, body) = send(
            app_with(provider),
            post_json("/llm/ollama/chat", json!({ "id": "abc", "prompt": "hello" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "Error");
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|error| error.contains("model is loading"))
        );
    }

    #[tokio::test]
    async fn chat_history_is_readable_after_a_turn() {
        let app = app();

        let (status, _) = send(
            app.clone(),
            post_json("/llm/ollama/chat", json!({ "id": "abc", "prompt": "hello" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(app, get_request("/llm/ollama/chat/abc")).await;
        assert_eq!(status, StatusCode::OK);

        let messages = body.as_array().expect("history array");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "hello");
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(messages[1]["content"], "echo: hello");
    }

    #[tokio::test]
    async fn unknown_chat_is_not_found() {
        let (status, body) = send(app(), get_request("/llm/ollama/chat/nobody")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "chat not found" }));
    }

    #[tokio::test]
    async fn unknown_or_unconfigured_backend_is_not_found() {
        let (status, _) = send(
            app(),
            post_json("/llm/bard/generate", json!({ "prompt": "hello" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(app(), get_request("/llm/openai/models")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "unknown backend: openai" }));
    }

    #[tokio::test]
    async fn models_lists_backend_models() {
        let (status, body) = send(app(), get_request("/llm/ollama/models")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["gemma2:2b", "llama3.2"]));
    }
}
