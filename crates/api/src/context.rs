use dumroo_auth::AdminRole;

/// Role context for a request (the administrator's selected role and scope).
///
/// This is immutable and must be present for all data routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleContext {
    role: AdminRole,
}

impl RoleContext {
    pub fn new(role: AdminRole) -> Self {
        Self { role }
    }

    pub fn role(&self) -> &AdminRole {
        &self.role
    }
}
