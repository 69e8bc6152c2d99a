//! Tracing-based observability hooks for conversation turns.
//!
//! ```rust
//! use pobserve::TracingObservabilityHooks;
//! use pchat::ConversationHooks;
//!
//! fn accepts_hooks(_hooks: &dyn ConversationHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use pchat::{ChatError, ConversationHooks};
use pcommon::SessionId;
use pprovider::{ProviderError, ProviderId, TokenUsage};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ConversationHooks for TracingObservabilityHooks {
    fn on_turn_start(&self, backend: ProviderId, session_id: &SessionId, model: &str) {
        tracing::info!(
            phase = "turn",
            event = "start",
            backend = %backend,
            session_id = %session_id,
            model
        );
    }

    fn on_model_fallback(&self, backend: ProviderId, requested: &str, effective: &str) {
        tracing::warn!(
            phase = "resolve",
            event = "fallback",
            backend = %backend,
            requested,
            model = effective
        );
    }

    fn on_turn_success(
        &self,
        backend: ProviderId,
        session_id: &SessionId,
        model: &str,
        usage: &TokenUsage,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "turn",
            event = "success",
            backend = %backend,
            session_id = %session_id,
            model,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_turn_failure(
        &self,
        backend: ProviderId,
        session_id: &SessionId,
        model: &str,
        error: &ChatError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "turn",
            event = "failure",
            backend = %backend,
            session_id = %session_id,
            model,
            error_kind = ?error.kind,
            client_error = error.is_client_error(),
            elapsed_ms = elapsed.as_millis() as u64,
            error = %error
        );
    }

    fn on_model_listing_failed(&self, backend: ProviderId, error: &ProviderError) {
        tracing::warn!(
            phase = "resolve",
            event = "listing_failed",
            backend = %backend,
            error_kind = ?error.kind,
            status = ?error.status,
            error = %error
        );
    }
}
