//! Shared application state injected into every handler.

use std::sync::Arc;

use parley::{ChatService, GatewayRuntime, ProviderId, parse_provider_id};

use crate::error::GatewayError;

#[derive(Clone)]
pub struct AppState {
    runtime: GatewayRuntime,
}

impl AppState {
    pub fn new(runtime: GatewayRuntime) -> Self {
        Self { runtime }
    }

    /// Looks up the chat service for a backend name taken from the route.
    pub fn service(&self, backend: &str) -> Result<Arc<ChatService>, GatewayError> {
        parse_provider_id(backend)
            .and_then(|provider_id| self.runtime.service(provider_id))
            .ok_or_else(|| GatewayError::UnknownBackend(backend.to_string()))
    }

    pub fn backends(&self) -> Vec<ProviderId> {
        self.runtime.backends()
    }
}
