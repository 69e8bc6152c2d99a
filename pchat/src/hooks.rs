//! Hook contracts for observing conversation turns.
//!
//! ```rust
//! use pchat::{ConversationHooks, NoopConversationHooks};
//!
//! fn accepts_hooks(_hooks: &dyn ConversationHooks) {}
//!
//! let hooks = NoopConversationHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use pcommon::SessionId;
use pprovider::{ProviderError, ProviderId, TokenUsage};

use crate::ChatError;

pub trait ConversationHooks: Send + Sync {
    fn on_turn_start(&self, _backend: ProviderId, _session_id: &SessionId, _model: &str) {}

    fn on_model_fallback(&self, _backend: ProviderId, _requested: &str, _effective: &str) {}

    fn on_turn_success(
        &self,
        _backend: ProviderId,
        _session_id: &SessionId,
        _model: &str,
        _usage: &TokenUsage,
        _elapsed: Duration,
    ) {
    }

    fn on_turn_failure(
        &self,
        _backend: ProviderId,
        _session_id: &SessionId,
        _model: &str,
        _error: &ChatError,
        _elapsed: Duration,
    ) {
    }

    fn on_model_listing_failed(&self, _backend: ProviderId, _error: &ProviderError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopConversationHooks;

impl ConversationHooks for NoopConversationHooks {}
