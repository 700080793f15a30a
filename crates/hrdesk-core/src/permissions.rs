//! Role and permission matrix.
//!
//! Capability resolution lives here and nowhere else: handlers ask
//! `role.allows(permission)` (via the request context) instead of comparing
//! roles inline, so the whole permission matrix is auditable in one table.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// User role, ordered from most to least privileged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    OrgAdmin,
    Manager,
    Employee,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Role::SuperAdmin => write!(f, "super_admin"),
            Role::OrgAdmin => write!(f, "org_admin"),
            Role::Manager => write!(f, "manager"),
            Role::Employee => write!(f, "employee"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = crate::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "org_admin" => Ok(Role::OrgAdmin),
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            other => Err(crate::AppError::InvalidInput(format!(
                "Unknown role: {}",
                other
            ))),
        }
    }
}

impl Role {
    /// Roles that can be granted through an invite or membership within an
    /// organization. Super admin is never org-scoped.
    pub fn is_org_scoped(&self) -> bool {
        !matches!(self, Role::SuperAdmin)
    }

    /// Whether this role grants the given permission.
    pub fn allows(&self, permission: Permission) -> bool {
        use Permission::*;
        match self {
            Role::SuperAdmin => true,
            Role::OrgAdmin => !matches!(permission, ManageOrganizations),
            Role::Manager => matches!(
                permission,
                ManageAttendance
                    | ViewAttendance
                    | ManageMaintenance
                    | SubmitMaintenance
                    | ManageTasks
                    | ViewTasks
                    | ManagePlanning
                    | ViewPlanning
                    | ManageVehicles
                    | ViewVehicles
            ),
            Role::Employee => matches!(
                permission,
                ViewAttendance | SubmitMaintenance | ViewTasks | ViewPlanning | ViewVehicles
            ),
        }
    }
}

/// A capability a handler can require. One permission per operation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Cross-tenant directory and lifecycle control (super admin only)
    ManageOrganizations,
    /// Invite, list, and remove members of the caller's organization
    ManageMembers,
    ManageAttendance,
    ViewAttendance,
    ManageMaintenance,
    SubmitMaintenance,
    ManageTasks,
    ViewTasks,
    ManagePlanning,
    ViewPlanning,
    ManageVehicles,
    ViewVehicles,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_allows_everything() {
        for p in [
            Permission::ManageOrganizations,
            Permission::ManageMembers,
            Permission::ManageAttendance,
            Permission::ViewVehicles,
        ] {
            assert!(Role::SuperAdmin.allows(p));
        }
    }

    #[test]
    fn test_org_admin_cannot_manage_organizations() {
        assert!(!Role::OrgAdmin.allows(Permission::ManageOrganizations));
        assert!(Role::OrgAdmin.allows(Permission::ManageMembers));
        assert!(Role::OrgAdmin.allows(Permission::ManageAttendance));
    }

    #[test]
    fn test_manager_cannot_manage_members() {
        assert!(!Role::Manager.allows(Permission::ManageMembers));
        assert!(Role::Manager.allows(Permission::ManageTasks));
        assert!(Role::Manager.allows(Permission::ManageVehicles));
    }

    #[test]
    fn test_employee_is_view_and_submit_only() {
        assert!(Role::Employee.allows(Permission::ViewAttendance));
        assert!(Role::Employee.allows(Permission::SubmitMaintenance));
        assert!(Role::Employee.allows(Permission::ViewTasks));
        assert!(!Role::Employee.allows(Permission::ManageAttendance));
        assert!(!Role::Employee.allows(Permission::ManageTasks));
        assert!(!Role::Employee.allows(Permission::ManageMembers));
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::SuperAdmin, Role::OrgAdmin, Role::Manager, Role::Employee] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_org_scoped_roles() {
        assert!(!Role::SuperAdmin.is_org_scoped());
        assert!(Role::OrgAdmin.is_org_scoped());
        assert!(Role::Employee.is_org_scoped());
    }

    #[test]
    fn test_role_serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::OrgAdmin).unwrap();
        assert_eq!(json, "\"org_admin\"");
        let role: Role = serde_json::from_str("\"super_admin\"").unwrap();
        assert_eq!(role, Role::SuperAdmin);
    }
}
