//! `dumroo-auth` — role-based visibility boundary over student records.
//!
//! This crate is intentionally decoupled from HTTP and from the completion
//! service: it only decides which records a role may see.

pub mod catalog;
pub mod explain;
pub mod filter;
pub mod roles;

pub use catalog::{RoleCatalog, RolePreset};
pub use explain::{AccessExplanation, explain_access};
pub use filter::{AccessError, FilteredView, filter};
pub use roles::{AdminRole, RoleKind};
