//! Metrics-based observability hooks for conversation turns.
//!
//! ```rust
//! use pobserve::MetricsObservabilityHooks;
//! use pchat::ConversationHooks;
//!
//! fn accepts_hooks(_hooks: &dyn ConversationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use pchat::{ChatError, ConversationHooks};
use pcommon::SessionId;
use pprovider::{ProviderError, ProviderId, TokenUsage};

/// Labels are limited to backend, status and error kind; model names never become series.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ConversationHooks for MetricsObservabilityHooks {
    fn on_turn_start(&self, backend: ProviderId, _session_id: &SessionId, _model: &str) {
        metrics::counter!("parley_turn_start_total", "backend" => backend.to_string())
            .increment(1);
    }

    fn on_model_fallback(&self, backend: ProviderId, _requested: &str, _effective: &str) {
        metrics::counter!("parley_model_fallback_total", "backend" => backend.to_string())
            .increment(1);
    }

    fn on_turn_success(
        &self,
        backend: ProviderId,
        _session_id: &SessionId,
        _model: &str,
        usage: &TokenUsage,
        elapsed: Duration,
    ) {
        metrics::counter!("parley_turn_success_total", "backend" => backend.to_string())
            .increment(1);
        metrics::histogram!(
            "parley_turn_duration_seconds",
            "backend" => backend.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
        metrics::counter!(
            "parley_tokens_total",
            "backend" => backend.to_string(),
            "direction" => "input"
        )
        .increment(u64::from(usage.input_tokens));
        metrics::counter!(
            "parley_tokens_total",
            "backend" => backend.to_string(),
            "direction" => "output"
        )
        .increment(u64::from(usage.output_tokens));
    }

    fn on_turn_failure(
        &self,
        backend: ProviderId,
        _session_id: &SessionId,
        _model: &str,
        error: &ChatError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "parley_turn_failure_total",
            "backend" => backend.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "parley_turn_duration_seconds",
            "backend" => backend.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_model_listing_failed(&self, backend: ProviderId, error: &ProviderError) {
        metrics::counter!(
            "parley_model_listing_failure_total",
            "backend" => backend.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }
}
