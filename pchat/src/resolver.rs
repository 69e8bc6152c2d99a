//! Model availability checks and default-model fallback.

use std::sync::Arc;

use pprovider::{ModelPolicy, ModelProvider};

use crate::ConversationHooks;

/// Outcome of checking a requested model against a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResolution {
    pub requested: String,
    pub effective: String,
}

impl ModelResolution {
    fn unchanged(model: &str) -> Self {
        Self {
            requested: model.to_string(),
            effective: model.to_string(),
        }
    }

    pub fn is_substituted(&self) -> bool {
        self.requested != self.effective
    }
}

#[derive(Clone)]
pub struct ModelResolver {
    provider: Arc<dyn ModelProvider>,
    hooks: Arc<dyn ConversationHooks>,
}

impl ModelResolver {
    pub fn new(provider: Arc<dyn ModelProvider>, hooks: Arc<dyn ConversationHooks>) -> Self {
        Self { provider, hooks }
    }

    /// Best-effort listing: a failed call is reported to hooks and reads as no models.
    pub async fn list_models(&self) -> Vec<String> {
        match self.provider.list_models().await {
            Ok(models) => models,
            Err(error) => {
                self.hooks
                    .on_model_listing_failed(self.provider.id(), &error);
                Vec::new()
            }
        }
    }

    pub async fn is_available(&self, model: &str) -> bool {
        if model.trim().is_empty() {
            return false;
        }

        self.list_models()
            .await
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(model))
    }

    pub async fn resolve(&self, requested: &str) -> ModelResolution {
        let default_model = self.provider.default_model();
        if self.provider.model_policy() == ModelPolicy::TrustRequested
            || requested == default_model
        {
            return ModelResolution::unchanged(requested);
        }

        if self.is_available(requested).await {
            return ModelResolution::unchanged(requested);
        }

        let resolution = ModelResolution {
            requested: requested.to_string(),
            effective: default_model.to_string(),
        };
        self.hooks
            .on_model_fallback(self.provider.id(), &resolution.requested, &resolution.effective);
        resolution
    }
}
