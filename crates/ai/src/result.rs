use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use dumroo_auth::FilteredView;

use crate::completion::CompletionError;

/// Answer to one question.
///
/// Carries the view the question was asked against so callers can display
/// both the answer and the data it was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// The completion service's text, verbatim.
    pub answer: String,
    pub view: FilteredView,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("completion service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("completion service did not answer within {0:?}")]
    UpstreamTimeout(Duration),
}

impl From<CompletionError> for QueryError {
    fn from(value: CompletionError) -> Self {
        match value {
            CompletionError::Unavailable(msg) => QueryError::UpstreamUnavailable(msg),
            CompletionError::InvalidResponse(msg) => {
                QueryError::UpstreamUnavailable(format!("invalid response: {msg}"))
            }
            CompletionError::Timeout(budget) => QueryError::UpstreamTimeout(budget),
        }
    }
}
