use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use hrdesk_core::{AppError, Permission, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure. `organization_id` is absent for super admins.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Uuid>,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Caller identity resolved by the auth middleware and stored in request
/// extensions. Permission checks go through [`AuthContext::require`] so the
/// role/permission matrix stays the single source of truth.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub role: Role,
}

impl AuthContext {
    /// Fail with 403 unless the caller's role grants the permission.
    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if self.role.allows(permission) {
            return Ok(());
        }
        Err(AppError::Forbidden(format!(
            "Role '{}' does not allow this operation",
            self.role
        )))
    }

    /// The caller's organization, for org-scoped endpoints. Super admins have
    /// no organization and cannot use these endpoints directly.
    pub fn org_id(&self) -> Result<Uuid, AppError> {
        self.organization_id.ok_or_else(|| {
            AppError::Forbidden("This operation requires organization membership".to_string())
        })
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Missing authentication context".to_string(),
                        details: None,
                        error_type: None,
                        code: "UNAUTHORIZED".to_string(),
                        recoverable: false,
                        suggested_action: Some("Check authentication token".to_string()),
                    }),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: Role, organization_id: Option<Uuid>) -> AuthContext {
        AuthContext {
            user_id: Uuid::new_v4(),
            organization_id,
            role,
        }
    }

    #[test]
    fn test_require_passes_for_granted_permission() {
        let ctx = ctx(Role::OrgAdmin, Some(Uuid::new_v4()));
        assert!(ctx.require(Permission::ManageMembers).is_ok());
    }

    #[test]
    fn test_require_rejects_with_forbidden() {
        let ctx = ctx(Role::Employee, Some(Uuid::new_v4()));
        let err = ctx.require(Permission::ManageMembers).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_org_id_rejects_super_admin() {
        let ctx = ctx(Role::SuperAdmin, None);
        assert!(matches!(ctx.org_id(), Err(AppError::Forbidden(_))));

        let org = Uuid::new_v4();
        let ctx = ctx_with_org(org);
        assert_eq!(ctx.org_id().unwrap(), org);
    }

    fn ctx_with_org(org: Uuid) -> AuthContext {
        ctx(Role::Manager, Some(org))
    }
}
