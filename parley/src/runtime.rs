//! Runtime wiring: one chat service per configured backend.

use std::sync::Arc;

use pcommon::Registry;

use crate::{
    ChatService, ConversationHooks, GatewayConfig, InMemorySessionStore, ModelProvider,
    ObservabilityHooks, ProviderError, ProviderId, ProviderRegistry, SafeConversationHooks,
    build_provider,
};

/// Hooks installed by default: tracing and metrics, isolated from panics.
pub fn default_hooks() -> Arc<dyn ConversationHooks> {
    Arc::new(SafeConversationHooks::new(ObservabilityHooks::new()))
}

pub fn chat_service(provider: Arc<dyn ModelProvider>) -> ChatService {
    chat_service_with_hooks(provider, default_hooks())
}

/// Each service gets its own session store, so a session id is scoped to one backend.
pub fn chat_service_with_hooks(
    provider: Arc<dyn ModelProvider>,
    hooks: Arc<dyn ConversationHooks>,
) -> ChatService {
    ChatService::builder(provider)
        .store(Arc::new(InMemorySessionStore::new()))
        .hooks(hooks)
        .build()
}

#[derive(Clone, Default)]
pub struct GatewayRuntime {
    services: Registry<ProviderId, Arc<ChatService>>,
}

impl GatewayRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, ProviderError> {
        let mut providers = ProviderRegistry::new();
        if let Some(ollama) = &config.ollama {
            providers.register_shared(build_provider(ProviderId::Ollama, ollama)?);
        }
        if let Some(openai) = &config.openai {
            providers.register_shared(build_provider(ProviderId::OpenAi, openai)?);
        }

        Ok(Self::from_registry(&providers, default_hooks()))
    }

    pub fn from_registry(
        providers: &ProviderRegistry,
        hooks: Arc<dyn ConversationHooks>,
    ) -> Self {
        let mut runtime = Self::new();
        for provider_id in providers.ids() {
            if let Some(provider) = providers.get(provider_id) {
                runtime.insert(chat_service_with_hooks(provider, Arc::clone(&hooks)));
            }
        }
        runtime
    }

    /// Registers `service` under its backend id, replacing any previous one.
    pub fn insert(&mut self, service: ChatService) -> Option<Arc<ChatService>> {
        self.services.insert(service.backend(), Arc::new(service))
    }

    pub fn service(&self, backend: ProviderId) -> Option<Arc<ChatService>> {
        self.services.get(&backend).cloned()
    }

    pub fn backends(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|backend| self.services.contains_key(backend))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
