//! Focused unit tests for OpenAI adapter internals.

#![cfg(test)]

use std::sync::Arc;

use crate::{
    GenerationOptions, Message, ModelRequest, ProviderError, ProviderErrorKind, ProviderFuture,
    Role, SecureCredentialManager,
};

use super::provider::OpenAiProvider;
use super::serde_api::{OpenAiApiResponse, build_api_request, parse_finish_reason};
use super::transport::OpenAiTransport;
use super::types::{OpenAiAuth, OpenAiFinishReason, OpenAiRequest, OpenAiResponse, OpenAiRole};

#[derive(Debug)]
struct NoopTransport;

impl OpenAiTransport for NoopTransport {
    fn complete<'a>(
        &'a self,
        _request: OpenAiRequest,
        _auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("not used")) })
    }

    fn list_models<'a>(
        &'a self,
        _auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("not used")) })
    }
}

fn provider() -> OpenAiProvider {
    OpenAiProvider::new(
        Arc::new(SecureCredentialManager::new()),
        Arc::new(NoopTransport),
    )
}

#[test]
fn build_openai_request_fills_unset_sampling_from_defaults() {
    let request = ModelRequest::new("gpt-4o-mini", vec![Message::new(Role::User, "hi")])
        .with_options(GenerationOptions::default().with_temperature(0.25));

    let built = provider().build_openai_request(request);
    assert_eq!(built.temperature, Some(0.25));
    assert_eq!(built.max_tokens, Some(1000));
    assert_eq!(built.top_p, Some(0.95));
    assert_eq!(built.frequency_penalty, Some(0.0));
    assert_eq!(built.presence_penalty, Some(0.0));
    assert_eq!(built.messages[0].role, OpenAiRole::User);
}

#[test]
fn build_openai_request_keeps_history_order() {
    let request = ModelRequest::new(
        "gpt-4o-mini",
        vec![
            Message::new(Role::User, "one"),
            Message::new(Role::Assistant, "two"),
            Message::new(Role::User, "three"),
        ],
    );

    let built = provider().build_openai_request(request);
    let contents = built
        .messages
        .iter()
        .map(|message| message.content.as_str())
        .collect::<Vec<_>>();
    assert_eq!(contents, vec!["one", "two", "three"]);
    assert_eq!(built.messages[1].role, OpenAiRole::Assistant);
}

#[test]
fn parse_finish_reason_maps_expected_values() {
    assert_eq!(parse_finish_reason(Some("stop")), OpenAiFinishReason::Stop);
    assert_eq!(
        parse_finish_reason(Some("length")),
        OpenAiFinishReason::Length
    );
    assert_eq!(
        parse_finish_reason(Some("content_filter")),
        OpenAiFinishReason::Other
    );
    assert_eq!(parse_finish_reason(None), OpenAiFinishReason::Other);
}

#[test]
fn api_request_serializes_wire_shape() {
    let request = provider().build_openai_request(ModelRequest::new(
        "gpt-4o-mini",
        vec![Message::new(Role::User, "hi")],
    ));

    let api_request = build_api_request(request).expect("request should build");
    let json = serde_json::to_value(&api_request).expect("serialize");
    assert_eq!(json["model"], "gpt-4o-mini");
    assert_eq!(
        json["messages"],
        serde_json::json!([{"role": "user", "content": "hi"}])
    );
    assert_eq!(json["max_tokens"], 1000);
    assert_eq!(json["frequency_penalty"], 0.0);
}

#[test]
fn response_without_choices_is_malformed() {
    let parsed: OpenAiApiResponse =
        serde_json::from_str(r#"{"model":"gpt-4o-mini","choices":[]}"#).expect("deserialize");

    let error = OpenAiResponse::try_from(parsed).expect_err("no choices must fail");
    assert_eq!(error.kind, ProviderErrorKind::MalformedResponse);
}

#[test]
fn response_with_null_content_is_malformed() {
    let parsed: OpenAiApiResponse = serde_json::from_str(
        r#"{"model":"gpt-4o-mini","choices":[{"message":{"role":"assistant","content":null},"finish_reason":"stop"}]}"#,
    )
    .expect("deserialize");

    let error = OpenAiResponse::try_from(parsed).expect_err("null content must fail");
    assert_eq!(error.kind, ProviderErrorKind::MalformedResponse);
}

#[test]
fn response_takes_first_choice_and_usage() {
    let parsed: OpenAiApiResponse = serde_json::from_str(
        r#"{
            "model":"gpt-4o-mini",
            "choices":[
                {"message":{"role":"assistant","content":"first"},"finish_reason":"length"},
                {"message":{"role":"assistant","content":"second"},"finish_reason":"stop"}
            ],
            "usage":{"prompt_tokens":4,"completion_tokens":6,"total_tokens":10}
        }"#,
    )
    .expect("deserialize");

    let response = OpenAiResponse::try_from(parsed).expect("response should map");
    assert_eq!(response.content, "first");
    assert_eq!(response.finish_reason, OpenAiFinishReason::Length);
    assert_eq!(response.usage.total_tokens, 10);
}
