use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who said a conversation turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// One earlier exchange, supplied by the caller for follow-up questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Speaker,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::Assistant,
            content: content.into(),
        }
    }
}

/// A single completion request: fixed instruction, data context, question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system_instruction: String,
    /// Textual rendering of the filtered view.
    pub context: String,
    pub question: String,
    pub history: Vec<ConversationTurn>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("completion service unavailable: {0}")]
    Unavailable(String),

    #[error("completion service timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid completion response: {0}")]
    InvalidResponse(String),
}

/// Capability to turn (context, question) into answer text.
///
/// Implementations block until the service answers or fails, and must not retry.
pub trait CompletionService: Send + Sync {
    fn submit(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

impl<T: CompletionService + ?Sized> CompletionService for Arc<T> {
    fn submit(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        (**self).submit(request)
    }
}

impl<T: CompletionService + ?Sized> CompletionService for Box<T> {
    fn submit(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        (**self).submit(request)
    }
}

impl<T: CompletionService + ?Sized> CompletionService for &T {
    fn submit(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        (**self).submit(request)
    }
}
