//! Role presets offered to administrators (for selection and display).

use std::collections::BTreeSet;

use serde::Serialize;

use dumroo_core::StudentRecord;

use crate::AdminRole;

/// A selectable role with its label and a description of what it sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolePreset {
    pub label: String,
    pub role: AdminRole,
    pub description: String,
}

impl RolePreset {
    pub fn new(role: AdminRole) -> Self {
        Self {
            label: role.to_string(),
            description: describe(&role),
            role,
        }
    }
}

/// Registry of role presets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleCatalog {
    pub presets: Vec<RolePreset>,
}

impl RoleCatalog {
    /// The fixed demo presets: super, grade 8, grade 9, class 8A, North region.
    pub fn default_presets() -> Self {
        let presets = [
            AdminRole::SuperAdmin,
            AdminRole::GradeAdmin("8".to_string()),
            AdminRole::GradeAdmin("9".to_string()),
            AdminRole::ClassAdmin("8A".to_string()),
            AdminRole::RegionAdmin("North".to_string()),
        ]
        .into_iter()
        .map(RolePreset::new)
        .collect();

        Self { presets }
    }

    /// One preset per distinct grade, class and region found in `records`,
    /// after `Super Admin`.
    pub fn from_dataset(records: &[StudentRecord]) -> Self {
        let grades: BTreeSet<&str> = records.iter().map(|r| r.grade.as_str()).collect();
        let classes: BTreeSet<&str> = records.iter().map(|r| r.class.as_str()).collect();
        let regions: BTreeSet<&str> = records.iter().map(|r| r.region.as_str()).collect();

        let mut grades: Vec<&str> = grades.into_iter().collect();
        // "10" after "9"
        grades.sort_by_key(|g| (g.parse::<u64>().unwrap_or(u64::MAX), *g));

        let mut presets = vec![RolePreset::new(AdminRole::SuperAdmin)];
        let scoped = grades
            .into_iter()
            .map(|g| AdminRole::GradeAdmin(g.to_string()))
            .chain(classes.into_iter().map(|c| AdminRole::ClassAdmin(c.to_string())))
            .chain(regions.into_iter().map(|r| AdminRole::RegionAdmin(r.to_string())));
        presets.extend(scoped.map(RolePreset::new));

        Self { presets }
    }

    pub fn find(&self, label: &str) -> Option<&RolePreset> {
        self.presets.iter().find(|p| p.label == label)
    }
}

/// Human-readable summary of a role's visibility.
pub fn describe(role: &AdminRole) -> String {
    match role {
        AdminRole::SuperAdmin => "Sees all data.".to_string(),
        AdminRole::GradeAdmin(g) => format!("Sees only Grade {g} students."),
        AdminRole::ClassAdmin(c) => format!("Sees only students in class {c}."),
        AdminRole::RegionAdmin(r) => format!("Sees only students from the {r} region."),
    }
}
