//! Bearer-token authentication middleware.
//!
//! Every protected request resolves the caller's user row and, for org
//! members, the organization row. Suspension is enforced here: members of a
//! suspended organization are rejected on their next request even if their
//! token is still valid, and deactivated accounts are rejected the same way.

use crate::auth::jwt::JwtService;
use crate::auth::models::AuthContext;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use hrdesk_core::{models::OrganizationStatus, AppError};
use hrdesk_db::{OrganizationRepository, UserRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: JwtService,
    pub users: UserRepository,
    pub organizations: OrganizationRepository,
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Ok(token) => token,
        Err(e) => return HttpAppError(e).into_response(),
    };

    match resolve_context(&auth_state, token).await {
        Ok(ctx) => {
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        Err(e) => HttpAppError(e).into_response(),
    }
}

fn bearer_token(request: &Request) -> Result<&str, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))
}

async fn resolve_context(auth_state: &AuthState, token: &str) -> Result<AuthContext, AppError> {
    let claims = auth_state.jwt.verify(token)?;

    let user = auth_state
        .users
        .get_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?;

    if !user.is_active {
        return Err(AppError::Unauthorized("Account is deactivated".to_string()));
    }

    if let Some(organization_id) = user.organization_id {
        let organization = auth_state
            .organizations
            .get_by_id(organization_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Organization no longer exists".to_string()))?;

        if organization.status != OrganizationStatus::Active {
            return Err(AppError::OrganizationSuspended(organization.name));
        }
    }

    Ok(AuthContext {
        user_id: user.id,
        organization_id: user.organization_id,
        role: user.role,
    })
}
