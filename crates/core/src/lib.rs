//! `dumroo-core` — student record model and dataset foundation.
//!
//! This crate contains **pure data** primitives: records, identifiers, the
//! validated in-memory dataset and its tabular rendering. No HTTP, no model calls.

pub mod dataset;
pub mod error;
pub mod id;
pub mod student;
pub mod table;

pub use dataset::{Dataset, DatasetError};
pub use error::{DomainError, DomainResult};
pub use id::StudentId;
pub use student::{QuizScore, StudentRecord, Submission, SubmissionStatus};
