use core::str::FromStr;

use serde::{Deserialize, Serialize};

use dumroo_core::StudentRecord;

use crate::AccessError;

/// Discriminant of [`AdminRole`], without the scope.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    SuperAdmin,
    GradeAdmin,
    ClassAdmin,
    RegionAdmin,
}

impl RoleKind {
    pub const ALL: [RoleKind; 4] = [
        RoleKind::SuperAdmin,
        RoleKind::GradeAdmin,
        RoleKind::ClassAdmin,
        RoleKind::RegionAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::SuperAdmin => "super_admin",
            RoleKind::GradeAdmin => "grade_admin",
            RoleKind::ClassAdmin => "class_admin",
            RoleKind::RegionAdmin => "region_admin",
        }
    }

    /// Name of the record field this kind is scoped to.
    pub fn scope_field(&self) -> Option<&'static str> {
        match self {
            RoleKind::SuperAdmin => None,
            RoleKind::GradeAdmin => Some("grade"),
            RoleKind::ClassAdmin => Some("class"),
            RoleKind::RegionAdmin => Some("region"),
        }
    }
}

impl core::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleKind {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RoleKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AccessError::UnknownRole(s.to_string()))
    }
}

/// The administrator role selected for a session.
///
/// Immutable once selected. Scoped variants carry the grade, class or region
/// they are restricted to; the scope is checked when filtering, so a role with
/// a blank scope can exist but never sees data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "scope", rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    GradeAdmin(String),
    ClassAdmin(String),
    RegionAdmin(String),
}

impl AdminRole {
    /// Build a role from its kind and an optional scope.
    ///
    /// `SuperAdmin` ignores the scope; scoped kinds with `None` get an empty scope.
    pub fn scoped(kind: RoleKind, scope: Option<&str>) -> Self {
        let scope = scope.unwrap_or_default().to_string();
        match kind {
            RoleKind::SuperAdmin => AdminRole::SuperAdmin,
            RoleKind::GradeAdmin => AdminRole::GradeAdmin(scope),
            RoleKind::ClassAdmin => AdminRole::ClassAdmin(scope),
            RoleKind::RegionAdmin => AdminRole::RegionAdmin(scope),
        }
    }

    pub fn kind(&self) -> RoleKind {
        match self {
            AdminRole::SuperAdmin => RoleKind::SuperAdmin,
            AdminRole::GradeAdmin(_) => RoleKind::GradeAdmin,
            AdminRole::ClassAdmin(_) => RoleKind::ClassAdmin,
            AdminRole::RegionAdmin(_) => RoleKind::RegionAdmin,
        }
    }

    pub fn scope(&self) -> Option<&str> {
        match self {
            AdminRole::SuperAdmin => None,
            AdminRole::GradeAdmin(s) | AdminRole::ClassAdmin(s) | AdminRole::RegionAdmin(s) => {
                Some(s.as_str())
            }
        }
    }

    /// Scoped roles must carry a non-blank scope.
    pub fn validate(&self) -> Result<(), AccessError> {
        match self.scope() {
            Some(scope) if scope.trim().is_empty() => {
                Err(AccessError::InvalidRoleScope(self.kind()))
            }
            _ => Ok(()),
        }
    }

    /// Whether a record is visible to this role (exact, case-sensitive match).
    pub fn permits(&self, record: &StudentRecord) -> bool {
        match self {
            AdminRole::SuperAdmin => true,
            AdminRole::GradeAdmin(g) => record.grade == *g,
            AdminRole::ClassAdmin(c) => record.class == *c,
            AdminRole::RegionAdmin(r) => record.region == *r,
        }
    }
}

/// Renders the preset label shown to administrators, e.g. `Grade 8 Admin`.
impl core::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AdminRole::SuperAdmin => f.write_str("Super Admin"),
            AdminRole::GradeAdmin(g) => write!(f, "Grade {g} Admin"),
            AdminRole::ClassAdmin(c) => write!(f, "{c} Class Admin"),
            AdminRole::RegionAdmin(r) => write!(f, "{r} Region Admin"),
        }
    }
}

/// Parses preset labels: `Super Admin`, `Grade <g> Admin`, `<c> Class Admin`,
/// `<r> Region Admin`. Keywords are case-insensitive and separated by single
/// spaces; the scope between them is kept byte-for-byte.
impl FromStr for AdminRole {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || AccessError::UnknownRole(s.to_string());

        if s.eq_ignore_ascii_case("super admin") {
            return Ok(AdminRole::SuperAdmin);
        }

        let body = strip_suffix_ignore_case(s, " admin").ok_or_else(unknown)?;

        let role = if let Some(scope) = strip_prefix_ignore_case(body, "grade ") {
            AdminRole::GradeAdmin(scope.to_string())
        } else if let Some(scope) = strip_suffix_ignore_case(body, " class") {
            AdminRole::ClassAdmin(scope.to_string())
        } else if let Some(scope) = strip_suffix_ignore_case(body, " region") {
            AdminRole::RegionAdmin(scope.to_string())
        } else {
            return Err(unknown());
        };

        match role.scope() {
            Some(scope) if !scope.is_empty() => Ok(role),
            _ => Err(unknown()),
        }
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if !s.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, rest) = s.split_at(prefix.len());
    head.eq_ignore_ascii_case(prefix).then_some(rest)
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    if !s.is_char_boundary(split) {
        return None;
    }
    let (rest, tail) = s.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_original_presets() {
        assert_eq!("Super Admin".parse::<AdminRole>().unwrap(), AdminRole::SuperAdmin);
        assert_eq!(
            "Grade 8 Admin".parse::<AdminRole>().unwrap(),
            AdminRole::GradeAdmin("8".to_string())
        );
        assert_eq!(
            "8A Class Admin".parse::<AdminRole>().unwrap(),
            AdminRole::ClassAdmin("8A".to_string())
        );
        assert_eq!(
            "North Region Admin".parse::<AdminRole>().unwrap(),
            AdminRole::RegionAdmin("North".to_string())
        );
    }

    #[test]
    fn keywords_are_case_insensitive_scopes_are_not() {
        assert_eq!(
            "grade 9 ADMIN".parse::<AdminRole>().unwrap(),
            AdminRole::GradeAdmin("9".to_string())
        );
        assert_eq!(
            "north region admin".parse::<AdminRole>().unwrap(),
            AdminRole::RegionAdmin("north".to_string())
        );
    }

    #[test]
    fn multi_word_scopes_are_joined() {
        assert_eq!(
            "North East Region Admin".parse::<AdminRole>().unwrap(),
            AdminRole::RegionAdmin("North East".to_string())
        );
    }

    #[test]
    fn scope_whitespace_is_kept_verbatim() {
        assert_eq!(
            "8  A Class Admin".parse::<AdminRole>().unwrap(),
            AdminRole::ClassAdmin("8  A".to_string())
        );
        assert_ne!(
            "8  A Class Admin".parse::<AdminRole>().unwrap(),
            "8 A Class Admin".parse::<AdminRole>().unwrap()
        );
    }

    #[test]
    fn unknown_labels_are_rejected() {
        for label in [
            "",
            "Admin",
            "Teacher",
            "Grade Admin",
            "Class Admin",
            "Grade 8 Teacher",
            "Grade  Admin",
            "Éé Admin",
        ] {
            assert!(
                matches!(label.parse::<AdminRole>(), Err(AccessError::UnknownRole(_))),
                "label {label:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let roles = [
            AdminRole::SuperAdmin,
            AdminRole::GradeAdmin("10".to_string()),
            AdminRole::ClassAdmin("9B".to_string()),
            AdminRole::RegionAdmin("South".to_string()),
            AdminRole::ClassAdmin("8  A".to_string()),
            AdminRole::GradeAdmin(" 8".to_string()),
            AdminRole::RegionAdmin("North\tEast".to_string()),
            AdminRole::RegionAdmin("Île-de-France".to_string()),
        ];
        for role in roles {
            assert_eq!(role.to_string().parse::<AdminRole>().unwrap(), role);
        }
    }

    #[test]
    fn serde_shape_is_kind_and_scope() {
        let json = serde_json::to_value(AdminRole::GradeAdmin("8".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "grade_admin", "scope": "8"}));

        let json = serde_json::to_value(AdminRole::SuperAdmin).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "super_admin"}));

        let role: AdminRole =
            serde_json::from_value(serde_json::json!({"kind": "region_admin", "scope": "North"}))
                .unwrap();
        assert_eq!(role, AdminRole::RegionAdmin("North".to_string()));
    }

    #[test]
    fn scoped_builds_each_kind() {
        assert_eq!(AdminRole::scoped(RoleKind::SuperAdmin, Some("x")), AdminRole::SuperAdmin);
        assert_eq!(
            AdminRole::scoped(RoleKind::ClassAdmin, Some("8A")),
            AdminRole::ClassAdmin("8A".to_string())
        );
        assert_eq!(
            AdminRole::scoped(RoleKind::GradeAdmin, None),
            AdminRole::GradeAdmin(String::new())
        );
    }

    #[test]
    fn validate_requires_scope_for_scoped_kinds() {
        assert!(AdminRole::SuperAdmin.validate().is_ok());
        assert!(AdminRole::GradeAdmin("8".to_string()).validate().is_ok());
        assert_eq!(
            AdminRole::RegionAdmin("   ".to_string()).validate(),
            Err(AccessError::InvalidRoleScope(RoleKind::RegionAdmin))
        );
    }

    #[test]
    fn role_kind_parses_snake_case_names() {
        assert_eq!("class_admin".parse::<RoleKind>().unwrap(), RoleKind::ClassAdmin);
        assert_eq!(" SUPER_ADMIN ".parse::<RoleKind>().unwrap(), RoleKind::SuperAdmin);
        assert!("owner".parse::<RoleKind>().is_err());
    }
}
