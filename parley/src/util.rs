//! Small convenience constructors and parsers.

use crate::{ChatRequest, GenerateRequest, Message, ProviderId, Role};

pub fn user_message(content: impl Into<String>) -> Message {
    Message::new(Role::User, content)
}

pub fn assistant_message(content: impl Into<String>) -> Message {
    Message::new(Role::Assistant, content)
}

/// A generate request that lets the backend pick its default model.
pub fn generate(prompt: impl Into<String>) -> GenerateRequest {
    GenerateRequest::new(prompt)
}

pub fn generate_with_model(model: impl Into<String>, prompt: impl Into<String>) -> GenerateRequest {
    GenerateRequest::new(prompt).with_model(model)
}

pub fn chat(id: impl Into<String>, prompt: impl Into<String>) -> ChatRequest {
    ChatRequest::new(id, prompt)
}

/// Parses a backend name as it appears in gateway routes.
pub fn parse_provider_id(value: &str) -> Option<ProviderId> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ollama" => Some(ProviderId::Ollama),
        "openai" | "open-ai" | "open_ai" => Some(ProviderId::OpenAi),
        _ => None,
    }
}
