//! Invite lifecycle handlers: issue, list, revoke, and the public accept
//! endpoint that redeems a token into a member account.

use crate::auth::password::hash_password;
use crate::auth::models::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::services::invites::InviteService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use hrdesk_core::{
    models::{InviteResponse, UserResponse},
    AppError, Permission, Role,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInviteRequest {
    #[validate(email)]
    pub email: String,
    pub role: Role,
}

/// Issuance response: the only place the token is ever returned.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateInviteResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    /// Redemption token; save it now, listings never include it.
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AcceptInviteRequest {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AcceptInviteResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Issue an invite into the caller's organization.
#[utoipa::path(
    post,
    path = "/api/v1/invites",
    request_body = CreateInviteRequest,
    responses(
        (status = 201, description = "Invite issued", body = CreateInviteResponse),
        (status = 409, description = "Email already a member or already invited", body = crate::error::ErrorResponse)
    ),
    tag = "invites"
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn create_invite(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(request): ValidatedJson<CreateInviteRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageMembers)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let service = InviteService::new(state.control.invites.clone(), state.control.users.clone());
    let invite = service
        .issue(organization_id, &request.email, request.role, ctx.user_id)
        .await
        .map_err(HttpAppError::from)?;

    // Best-effort notification; the invite stands even if the email fails.
    if let Some(email) = &state.email {
        let organization = state
            .control
            .organizations
            .get_by_id(organization_id)
            .await
            .map_err(HttpAppError::from)?;
        let organization_name = organization
            .map(|o| o.name)
            .unwrap_or_else(|| "your organization".to_string());

        if let Err(e) = email
            .send_invite(&invite.email, &organization_name, &invite.token)
            .await
        {
            tracing::warn!(error = %e, "Failed to send invite email");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateInviteResponse {
            id: invite.id,
            email: invite.email,
            role: invite.role,
            token: invite.token,
            expires_at: invite.expires_at,
        }),
    ))
}

/// List pending invites for the caller's organization. Tokens are omitted.
#[utoipa::path(
    get,
    path = "/api/v1/invites",
    responses(
        (status = 200, description = "Pending invites", body = [InviteResponse]),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "invites"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_invites(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageMembers)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let invites = state
        .control
        .invites
        .list_by_organization(organization_id)
        .await
        .map_err(HttpAppError::from)?;

    let response: Vec<InviteResponse> = invites.into_iter().map(InviteResponse::from).collect();
    Ok(Json(response))
}

/// Revoke a pending invite.
#[utoipa::path(
    delete,
    path = "/api/v1/invites/{id}",
    params(("id" = Uuid, Path, description = "Invite ID")),
    responses(
        (status = 204, description = "Revoked"),
        (status = 404, description = "Invite not found", body = crate::error::ErrorResponse)
    ),
    tag = "invites"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn revoke_invite(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageMembers)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let revoked = state
        .control
        .invites
        .delete(id, organization_id)
        .await
        .map_err(HttpAppError::from)?;

    if !revoked {
        return Err(HttpAppError(AppError::NotFound(
            "Invite not found".to_string(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Redeem an invite token into a member account (public endpoint).
///
/// A consumed, revoked, or unknown token yields 404; an expired one yields
/// 410 with the expiry timestamp so the caller knows to ask for a new invite.
/// Invites into a suspended organization cannot be redeemed, matching the
/// sign-in rule for existing members.
#[utoipa::path(
    post,
    path = "/api/v1/invites/accept",
    request_body = AcceptInviteRequest,
    responses(
        (status = 201, description = "Account created", body = AcceptInviteResponse),
        (status = 403, description = "Organization suspended", body = crate::error::ErrorResponse),
        (status = 404, description = "Invite invalid", body = crate::error::ErrorResponse),
        (status = 410, description = "Invite expired", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    ),
    tag = "invites"
)]
#[tracing::instrument(skip(state, request))]
pub async fn accept_invite(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<AcceptInviteRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let password_hash = hash_password(&request.password).map_err(HttpAppError::from)?;

    let service = InviteService::new(state.control.invites.clone(), state.control.users.clone());
    let user = service
        .accept(&request.token, request.full_name.trim(), &password_hash)
        .await
        .map_err(HttpAppError::from)?;

    tracing::info!(user_id = %user.id, "Invite redeemed");

    let token = state.jwt.sign(&user).map_err(HttpAppError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(AcceptInviteResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}
