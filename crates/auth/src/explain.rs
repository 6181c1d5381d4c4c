// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

use serde::Serialize;

use dumroo_core::StudentRecord;

use crate::{AdminRole, RoleKind, filter};

/// Detailed explanation of what a role may see and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessExplanation {
    /// Preset label of the role, e.g. `Grade 8 Admin`.
    pub role: String,
    pub kind: RoleKind,
    pub scope: Option<String>,

    /// Whether the role is valid and a view could be produced.
    pub granted: bool,

    /// The visibility rule applied, e.g. `grade == "8"`.
    pub rule: String,

    pub visible: usize,
    pub hidden: usize,

    /// Human-readable reason for the decision.
    pub reason: String,
}

/// Explain the visibility decision for `role` over `records`.
///
/// Never fails: an invalid role produces `granted = false` with the error as reason.
pub fn explain_access(records: &[StudentRecord], role: &AdminRole) -> AccessExplanation {
    let total = records.len();
    let rule = match (role.kind().scope_field(), role.scope()) {
        (Some(field), Some(scope)) => format!("{field} == {scope:?}"),
        _ => "all records".to_string(),
    };

    match filter(records, role) {
        Ok(view) => {
            let visible = view.len();
            let reason = match role {
                AdminRole::SuperAdmin => format!("{role} sees every record ({total})"),
                _ if visible == 0 => format!("{role} sees no records: no record matches {rule}"),
                _ => format!("{role} sees {visible} of {total} records where {rule}"),
            };

            AccessExplanation {
                role: role.to_string(),
                kind: role.kind(),
                scope: role.scope().map(str::to_string),
                granted: true,
                rule,
                visible,
                hidden: total - visible,
                reason,
            }
        }
        Err(e) => AccessExplanation {
            role: role.to_string(),
            kind: role.kind(),
            scope: role.scope().map(str::to_string),
            granted: false,
            rule,
            visible: 0,
            hidden: total,
            reason: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dumroo_core::StudentId;

    fn rec(id: u64, grade: &str, region: &str) -> StudentRecord {
        StudentRecord {
            student_id: StudentId::new(id),
            name: format!("S{id}"),
            grade: grade.to_string(),
            class: format!("{grade}A"),
            region: region.to_string(),
            submissions: Vec::new(),
            quizzes: Vec::new(),
        }
    }

    fn records() -> Vec<StudentRecord> {
        vec![rec(1, "8", "North"), rec(2, "9", "South"), rec(3, "8", "South")]
    }

    #[test]
    fn super_admin_explanation() {
        let e = explain_access(&records(), &AdminRole::SuperAdmin);
        assert!(e.granted);
        assert_eq!(e.rule, "all records");
        assert_eq!((e.visible, e.hidden), (3, 0));
        assert_eq!(e.reason, "Super Admin sees every record (3)");
        assert_eq!(e.scope, None);
    }

    #[test]
    fn scoped_explanation_counts_visible_and_hidden() {
        let e = explain_access(&records(), &AdminRole::GradeAdmin("8".into()));
        assert!(e.granted);
        assert_eq!(e.rule, "grade == \"8\"");
        assert_eq!((e.visible, e.hidden), (2, 1));
        assert_eq!(e.reason, "Grade 8 Admin sees 2 of 3 records where grade == \"8\"");
    }

    #[test]
    fn no_match_is_granted_but_empty() {
        let e = explain_access(&records(), &AdminRole::RegionAdmin("East".into()));
        assert!(e.granted);
        assert_eq!(e.visible, 0);
        assert!(e.reason.contains("no record matches"));
    }

    #[test]
    fn invalid_scope_is_denied() {
        let e = explain_access(&records(), &AdminRole::ClassAdmin(String::new()));
        assert!(!e.granted);
        assert_eq!(e.kind, RoleKind::ClassAdmin);
        assert_eq!(e.hidden, 3);
        assert_eq!(e.reason, "role 'class_admin' requires a non-empty scope");
    }
}
