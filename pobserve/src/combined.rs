use std::time::Duration;

use pchat::{ChatError, ConversationHooks};
use pcommon::SessionId;
use pprovider::{ProviderError, ProviderId, TokenUsage};

use crate::{MetricsObservabilityHooks, TracingObservabilityHooks};

/// Structured logs and metrics for every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObservabilityHooks {
    tracing: TracingObservabilityHooks,
    metrics: MetricsObservabilityHooks,
}

impl ObservabilityHooks {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationHooks for ObservabilityHooks {
    fn on_turn_start(&self, backend: ProviderId, session_id: &SessionId, model: &str) {
        self.tracing.on_turn_start(backend, session_id, model);
        self.metrics.on_turn_start(backend, session_id, model);
    }

    fn on_model_fallback(&self, backend: ProviderId, requested: &str, effective: &str) {
        self.tracing.on_model_fallback(backend, requested, effective);
        self.metrics.on_model_fallback(backend, requested, effective);
    }

    fn on_turn_success(
        &self,
        backend: ProviderId,
        session_id: &SessionId,
        model: &str,
        usage: &TokenUsage,
        elapsed: Duration,
    ) {
        self.tracing
            .on_turn_success(backend, session_id, model, usage, elapsed);
        self.metrics
            .on_turn_success(backend, session_id, model, usage, elapsed);
    }

    fn on_turn_failure(
        &self,
        backend: ProviderId,
        session_id: &SessionId,
        model: &str,
        error: &ChatError,
        elapsed: Duration,
    ) {
        self.tracing
            .on_turn_failure(backend, session_id, model, error, elapsed);
        self.metrics
            .on_turn_failure(backend, session_id, model, error, elapsed);
    }

    fn on_model_listing_failed(&self, backend: ProviderId, error: &ProviderError) {
        self.tracing.on_model_listing_failed(backend, error);
        self.metrics.on_model_listing_failed(backend, error);
    }
}
