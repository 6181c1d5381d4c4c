use std::time::Instant;

use dumroo_auth::FilteredView;

use crate::completion::{CompletionRequest, CompletionService, ConversationTurn};
use crate::config::ModelConfig;
use crate::prompt;
use crate::result::{QueryError, QueryResult};

/// Forwards questions about a filtered view to a completion service.
///
/// Stateless: every call builds one request and issues it once.
#[derive(Debug, Clone)]
pub struct QueryDispatcher<C> {
    service: C,
    config: ModelConfig,
}

impl<C: CompletionService> QueryDispatcher<C> {
    pub fn new(service: C, config: ModelConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Answer `question` about `view`.
    pub fn answer(&self, view: &FilteredView, question: &str) -> Result<QueryResult, QueryError> {
        self.answer_with_history(view, question, &[])
    }

    /// Answer a follow-up question; `history` is supplied by the caller.
    ///
    /// Blank questions fail with [`QueryError::EmptyQuestion`] before any call
    /// is made. Upstream failures are returned as-is, never retried.
    pub fn answer_with_history(
        &self,
        view: &FilteredView,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<QueryResult, QueryError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(QueryError::EmptyQuestion);
        }

        let request = CompletionRequest {
            system_instruction: prompt::system_instruction(self.config.reference_date),
            context: prompt::render_context(view),
            question: question.to_string(),
            history: history.to_vec(),
        };

        let started = Instant::now();
        match self.service.submit(&request) {
            Ok(answer) => {
                tracing::info!(
                    role = %view.role(),
                    records = view.len(),
                    question_len = question.len(),
                    history_turns = history.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "question answered"
                );
                Ok(QueryResult {
                    answer,
                    view: view.clone(),
                })
            }
            Err(e) => {
                tracing::warn!(
                    role = %view.role(),
                    records = view.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "completion request failed"
                );
                Err(e.into())
            }
        }
    }
}
