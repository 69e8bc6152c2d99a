//! Turn orchestration: session lookup, model resolution, backend dispatch, envelopes.

use std::sync::Arc;
use std::time::Instant;

use pcommon::{GenerationOptions, SessionId};
use pprovider::{Message, ModelProvider, ModelRequest, ProviderId, TokenUsage};
use uuid::Uuid;

use crate::{
    ChatError, ChatMessage, ChatRequest, ChatResponse, ChatSession, ConversationHooks,
    GenerateRequest, InMemorySessionStore, ModelResolver, NoopConversationHooks, SessionHandle,
    SessionStore,
};

pub struct ChatServiceBuilder {
    provider: Arc<dyn ModelProvider>,
    store: Arc<dyn SessionStore>,
    hooks: Arc<dyn ConversationHooks>,
    options: GenerationOptions,
}

impl ChatServiceBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            store: Arc::new(InMemorySessionStore::new()),
            hooks: Arc::new(NoopConversationHooks),
            options: GenerationOptions::default(),
        }
    }

    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = store;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn ConversationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Sampling applied to every turn; unset fields fall through to the backend's defaults.
    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> ChatService {
        ChatService {
            resolver: ModelResolver::new(Arc::clone(&self.provider), Arc::clone(&self.hooks)),
            provider: self.provider,
            store: self.store,
            hooks: self.hooks,
            options: self.options,
        }
    }
}

#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn ModelProvider>,
    store: Arc<dyn SessionStore>,
    resolver: ModelResolver,
    hooks: Arc<dyn ConversationHooks>,
    options: GenerationOptions,
}

impl ChatService {
    pub fn new(provider: Arc<dyn ModelProvider>, store: Arc<dyn SessionStore>) -> Self {
        ChatServiceBuilder::new(provider).store(store).build()
    }

    pub fn builder(provider: Arc<dyn ModelProvider>) -> ChatServiceBuilder {
        ChatServiceBuilder::new(provider)
    }

    pub fn backend(&self) -> ProviderId {
        self.provider.id()
    }

    pub fn default_model(&self) -> &str {
        self.provider.default_model()
    }

    /// Starts a new conversation under a freshly generated id.
    pub async fn generate(&self, request: GenerateRequest) -> ChatResponse {
        let id = SessionId::new(Uuid::new_v4().to_string());
        let model = request
            .model
            .map(|model| model.trim().to_string())
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| self.default_model().to_string());

        self.process_turn(id, model, request.prompt).await
    }

    /// Continues `request.id`. An unseen id starts a session under that id with the default model.
    pub async fn chat(&self, request: ChatRequest) -> ChatResponse {
        let id = SessionId::new(request.id);
        if id.is_empty() {
            let error = ChatError::invalid_request("id must not be empty");
            return ChatResponse::failure(id.into_inner(), String::new(), &error);
        }

        let model = self.default_model().to_string();
        self.process_turn(id, model, request.prompt).await
    }

    /// Messages of `id` in conversation order; empty when the session is unknown.
    pub async fn history(&self, id: &SessionId) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self
            .session(id)
            .await?
            .map(|session| session.messages)
            .unwrap_or_default())
    }

    pub async fn session(&self, id: &SessionId) -> Result<Option<ChatSession>, ChatError> {
        self.store.get(id).await
    }

    pub fn session_count(&self) -> Result<usize, ChatError> {
        self.store.len()
    }

    pub async fn list_models(&self) -> Vec<String> {
        self.resolver.list_models().await
    }

    pub async fn is_model_available(&self, model: &str) -> bool {
        self.resolver.is_available(model).await
    }

    async fn process_turn(&self, id: SessionId, model: String, prompt: String) -> ChatResponse {
        let started = Instant::now();

        match self.execute_turn(&id, model, prompt).await {
            Ok(outcome) => {
                self.hooks.on_turn_success(
                    self.backend(),
                    &id,
                    &outcome.model,
                    &outcome.usage,
                    started.elapsed(),
                );
                ChatResponse::success(id.into_inner(), outcome.model, outcome.reply)
                    .with_substituted_from(outcome.substituted_from)
            }
            Err(failure) => {
                self.hooks.on_turn_failure(
                    self.backend(),
                    &id,
                    &failure.model,
                    &failure.error,
                    started.elapsed(),
                );
                ChatResponse::failure(id.into_inner(), failure.model, &failure.error)
                    .with_substituted_from(failure.substituted_from)
            }
        }
    }

    async fn execute_turn(
        &self,
        id: &SessionId,
        requested_model: String,
        prompt: String,
    ) -> Result<TurnOutcome, TurnFailure> {
        if prompt.trim().is_empty() {
            return Err(TurnFailure::new(
                requested_model,
                ChatError::invalid_request("prompt must not be empty"),
            ));
        }

        let OpenedSession {
            session,
            substituted_from,
        } = self
            .open_session(id, &requested_model)
            .await
            .map_err(|error| TurnFailure::new(requested_model, error))?;

        let model = session.model().to_string();
        if model.trim().is_empty() {
            return Err(TurnFailure::new(model, ChatError::model_not_set()));
        }

        self.hooks.on_turn_start(self.backend(), id, &model);

        let mut turn = session.begin_turn().await;
        let user_message = ChatMessage::user(prompt);
        let request = ModelRequest::builder(model.clone())
            .messages(turn.messages().iter().map(Message::from))
            .message(Message::from(&user_message))
            .options(self.options)
            .build()
            .map_err(|error| {
                TurnFailure::new(model.clone(), ChatError::from(error))
                    .with_substitution(substituted_from.clone())
            })?;

        // The user message stays in history even if the backend call fails.
        turn.push(user_message);

        match self.provider.complete(request).await {
            Ok(response) => {
                turn.push(ChatMessage::assistant(response.content.clone()));
                Ok(TurnOutcome {
                    model,
                    reply: response.content,
                    usage: response.usage,
                    substituted_from,
                })
            }
            Err(error) => {
                Err(TurnFailure::new(model, ChatError::from(error))
                    .with_substitution(substituted_from))
            }
        }
    }

    /// Existing sessions keep their stored model; fresh ones go through model resolution.
    async fn open_session(
        &self,
        id: &SessionId,
        requested_model: &str,
    ) -> Result<OpenedSession, ChatError> {
        if let Some(session) = self.store.lookup(id)? {
            return Ok(OpenedSession {
                session,
                substituted_from: None,
            });
        }

        if requested_model.trim().is_empty() {
            return Err(ChatError::model_not_set());
        }

        let resolution = self.resolver.resolve(requested_model).await;
        let session = self.store.get_or_create(id, &resolution.effective)?;

        // A concurrent creator may have won with a different model.
        let substituted_from = (resolution.is_substituted()
            && session.model() == resolution.effective)
            .then_some(resolution.requested);

        Ok(OpenedSession {
            session,
            substituted_from,
        })
    }
}

struct OpenedSession {
    session: SessionHandle,
    substituted_from: Option<String>,
}

struct TurnOutcome {
    model: String,
    reply: String,
    usage: TokenUsage,
    substituted_from: Option<String>,
}

struct TurnFailure {
    model: String,
    error: ChatError,
    substituted_from: Option<String>,
}

impl TurnFailure {
    fn new(model: String, error: ChatError) -> Self {
        Self {
            model,
            error,
            substituted_from: None,
        }
    }

    fn with_substitution(mut self, substituted_from: Option<String>) -> Self {
        self.substituted_from = substituted_from;
        self
    }
}
