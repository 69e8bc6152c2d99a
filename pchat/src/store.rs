//! Session storage contracts and the in-memory implementation.
//!
//! Each session owns its own async lock. A turn holds that lock from the moment it reads
//! history until the assistant reply is appended, so two turns on one id never interleave
//! while turns on different ids run in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use pcommon::{BoxFuture, SessionId};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::{ChatError, ChatMessage, ChatSession};

pub type ChatFuture<'a, T> = BoxFuture<'a, T>;
pub type SessionHandle = Arc<SessionCell>;

#[derive(Debug)]
pub struct SessionCell {
    id: SessionId,
    model: String,
    messages: Arc<AsyncMutex<Vec<ChatMessage>>>,
}

impl SessionCell {
    pub fn new(id: SessionId, model: impl Into<String>) -> Self {
        Self {
            id,
            model: model.into(),
            messages: Arc::new(AsyncMutex::new(Vec::new())),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Fixed at creation.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn snapshot(&self) -> ChatSession {
        let messages = self.messages.lock().await;
        ChatSession {
            id: self.id.clone(),
            model: self.model.clone(),
            messages: messages.clone(),
        }
    }

    pub async fn append(&self, message: ChatMessage) {
        self.messages.lock().await.push(message);
    }

    /// Waits for any in-flight turn on this session, then claims it exclusively.
    pub async fn begin_turn(&self) -> SessionTurn {
        SessionTurn {
            messages: Arc::clone(&self.messages).lock_owned().await,
        }
    }
}

/// Exclusive access to one session's history for the duration of a turn.
pub struct SessionTurn {
    messages: OwnedMutexGuard<Vec<ChatMessage>>,
}

impl SessionTurn {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }
}

pub trait SessionStore: Send + Sync {
    /// Returns the session for `id`, creating it with `model` only if absent.
    /// Concurrent callers for one id all receive the same session.
    fn get_or_create(&self, id: &SessionId, model: &str) -> Result<SessionHandle, ChatError>;

    fn lookup(&self, id: &SessionId) -> Result<Option<SessionHandle>, ChatError>;

    fn len(&self) -> Result<usize, ChatError>;

    fn is_empty(&self) -> Result<bool, ChatError> {
        Ok(self.len()? == 0)
    }

    fn get<'a>(
        &'a self,
        id: &'a SessionId,
    ) -> ChatFuture<'a, Result<Option<ChatSession>, ChatError>> {
        Box::pin(async move {
            match self.lookup(id)? {
                Some(cell) => Ok(Some(cell.snapshot().await)),
                None => Ok(None),
            }
        })
    }

    /// Appending to an unknown id is a no-op.
    fn append<'a>(
        &'a self,
        id: &'a SessionId,
        message: ChatMessage,
    ) -> ChatFuture<'a, Result<(), ChatError>> {
        Box::pin(async move {
            if let Some(cell) = self.lookup(id)? {
                cell.append(message).await;
            }
            Ok(())
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<SessionId, SessionHandle>>, ChatError> {
        self.sessions
            .lock()
            .map_err(|_| ChatError::internal("session store lock poisoned"))
    }
}

impl SessionStore for InMemorySessionStore {
    fn get_or_create(&self, id: &SessionId, model: &str) -> Result<SessionHandle, ChatError> {
        let mut sessions = self.sessions()?;
        let cell = sessions
            .entry(id.clone())
            .or_insert_with(|| Arc::new(SessionCell::new(id.clone(), model)));
        Ok(Arc::clone(cell))
    }

    fn lookup(&self, id: &SessionId) -> Result<Option<SessionHandle>, ChatError> {
        Ok(self.sessions()?.get(id).cloned())
    }

    fn len(&self) -> Result<usize, ChatError> {
        Ok(self.sessions()?.len())
    }
}
