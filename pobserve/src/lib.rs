//! Production-friendly observability hooks for conversation turns.
//!
//! ```rust
//! use pobserve::{ObservabilityHooks, SafeConversationHooks, TracingObservabilityHooks};
//!
//! let _tracing = SafeConversationHooks::new(TracingObservabilityHooks);
//! let _combined = SafeConversationHooks::new(ObservabilityHooks::default());
//! ```

mod combined;
mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use combined::ObservabilityHooks;
pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::SafeConversationHooks;
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, ObservabilityHooks, SafeConversationHooks,
        TracingObservabilityHooks,
    };
}
