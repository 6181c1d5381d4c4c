use serde::Serialize;
use thiserror::Error;

use dumroo_core::StudentRecord;

use crate::{AdminRole, RoleKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("role '{0}' requires a non-empty scope")]
    InvalidRoleScope(RoleKind),

    #[error("unknown admin role '{0}'")]
    UnknownRole(String),
}

/// The records visible to one role, in dataset order.
///
/// Derived value: recompute it when the role changes, never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredView {
    role: AdminRole,
    records: Vec<StudentRecord>,
}

impl FilteredView {
    pub fn role(&self) -> &AdminRole {
        &self.role
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter()
    }
}

/// Reduce `records` to the subset `role` may see.
///
/// - No IO
/// - No panics
/// - Deterministic and idempotent; an empty result is not an error
pub fn filter(records: &[StudentRecord], role: &AdminRole) -> Result<FilteredView, AccessError> {
    role.validate()?;

    let visible: Vec<StudentRecord> = records
        .iter()
        .filter(|r| role.permits(r))
        .cloned()
        .collect();

    tracing::debug!(
        role = %role,
        visible = visible.len(),
        total = records.len(),
        "filtered student records"
    );

    Ok(FilteredView {
        role: role.clone(),
        records: visible,
    })
}
