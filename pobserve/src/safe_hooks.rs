use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use pchat::{ChatError, ConversationHooks};
use pcommon::SessionId;
use pprovider::{ProviderError, ProviderId, TokenUsage};

/// Runs every callback of `H` under `catch_unwind`; a panicking observer never fails a turn.
pub struct SafeConversationHooks<H> {
    inner: H,
}

impl<H> SafeConversationHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H> ConversationHooks for SafeConversationHooks<H>
where
    H: ConversationHooks,
{
    fn on_turn_start(&self, backend: ProviderId, session_id: &SessionId, model: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_start(backend, session_id, model)
        }));
    }

    fn on_model_fallback(&self, backend: ProviderId, requested: &str, effective: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_model_fallback(backend, requested, effective)
        }));
    }

    fn on_turn_success(
        &self,
        backend: ProviderId,
        session_id: &SessionId,
        model: &str,
        usage: &TokenUsage,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_turn_success(backend, session_id, model, usage, elapsed)
        }));
    }

    fn on_turn_failure(
        &self,
        backend: ProviderId,
        session_id: &SessionId,
        model: &str,
        error: &ChatError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_turn_failure(backend, session_id, model, error, elapsed)
        }));
    }

    fn on_model_listing_failed(&self, backend: ProviderId, error: &ProviderError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_model_listing_failed(backend, error)
        }));
    }
}
