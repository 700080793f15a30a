//! Authentication handlers: login and current-user lookup.

use crate::auth::models::AuthContext;
use crate::auth::password::verify_password;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use hrdesk_core::{
    models::{OrganizationStatus, UserResponse},
    AppError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Authenticate with email and password, returning a session token.
///
/// Wrong email and wrong password produce the same error so the endpoint
/// does not leak which accounts exist.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse),
        (status = 403, description = "Organization suspended", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(state, request))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = state
        .control
        .users
        .get_by_email(&request.email)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(invalid()))?;

    if !verify_password(&request.password, &user.password_hash).map_err(HttpAppError::from)? {
        return Err(HttpAppError(invalid()));
    }

    if !user.is_active {
        return Err(HttpAppError(AppError::Unauthorized(
            "Account is deactivated".to_string(),
        )));
    }

    if let Some(organization_id) = user.organization_id {
        let organization = state
            .control
            .organizations
            .get_by_id(organization_id)
            .await
            .map_err(HttpAppError::from)?
            .ok_or_else(|| HttpAppError(invalid()))?;

        if organization.status != OrganizationStatus::Active {
            return Err(HttpAppError(AppError::OrganizationSuspended(
                organization.name,
            )));
        }
    }

    let token = state.jwt.sign(&user).map_err(HttpAppError::from)?;

    state
        .control
        .users
        .update_last_sign_in(user.id)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// Return the authenticated caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn me(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let user = state
        .control
        .users
        .get_by_id(ctx.user_id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("User not found".to_string())))?;

    Ok(Json(UserResponse::from(user)))
}
