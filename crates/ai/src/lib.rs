//! `dumroo-ai`
//!
//! **Responsibility:** answering free-text questions about a filtered view by
//! delegating to an external completion service.
//!
//! This crate is intentionally **not** part of the access boundary:
//! - It never filters records itself; it receives an already-filtered view.
//! - It never caches or retries; every question is one fresh request.
//! - The completion service sits behind [`CompletionService`], so the dispatcher
//!   can be driven by any implementation (Gemini in production, stubs in tests).

pub mod completion;
pub mod config;
pub mod dispatcher;
pub mod gemini;
pub mod prompt;
pub mod result;

pub use completion::{
    CompletionError, CompletionRequest, CompletionService, ConversationTurn, Speaker,
};
pub use config::ModelConfig;
pub use dispatcher::QueryDispatcher;
pub use gemini::GeminiClient;
pub use result::{QueryError, QueryResult};
