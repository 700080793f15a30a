//! Member management within the caller's organization.

use crate::auth::models::AuthContext;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use hrdesk_core::{models::UserResponse, AppError, Permission, Role};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMemberRoleRequest {
    pub role: Role,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMemberStatusRequest {
    pub is_active: bool,
}

/// List members of the caller's organization.
#[utoipa::path(
    get,
    path = "/api/v1/members",
    responses(
        (status = 200, description = "Members", body = [UserResponse]),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "members"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_members(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageMembers)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let members = state
        .control
        .users
        .list_by_organization(organization_id)
        .await
        .map_err(HttpAppError::from)?;

    let response: Vec<UserResponse> = members.into_iter().map(UserResponse::from).collect();
    Ok(Json(response))
}

/// Change a member's role. Only organization roles can be granted this way.
#[utoipa::path(
    put,
    path = "/api/v1/members/{id}/role",
    params(("id" = Uuid, Path, description = "Member ID")),
    request_body = UpdateMemberRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = UserResponse),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    ),
    tag = "members"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn set_member_role(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMemberRoleRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageMembers)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    if !request.role.is_org_scoped() {
        return Err(HttpAppError(AppError::BadRequest(
            "Members can only hold organization roles".to_string(),
        )));
    }

    if id == ctx.user_id {
        return Err(HttpAppError(AppError::BadRequest(
            "You cannot change your own role".to_string(),
        )));
    }

    let member = state
        .control
        .users
        .set_role(id, organization_id, request.role)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Member not found".to_string())))?;

    Ok(Json(UserResponse::from(member)))
}

/// Activate or deactivate a member. Deactivated members fail authentication
/// on their next request.
#[utoipa::path(
    put,
    path = "/api/v1/members/{id}/status",
    params(("id" = Uuid, Path, description = "Member ID")),
    request_body = UpdateMemberStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UserResponse),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    ),
    tag = "members"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn set_member_status(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMemberStatusRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageMembers)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    if id == ctx.user_id {
        return Err(HttpAppError(AppError::BadRequest(
            "You cannot deactivate your own account".to_string(),
        )));
    }

    let member = state
        .control
        .users
        .set_active(id, organization_id, request.is_active)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Member not found".to_string())))?;

    Ok(Json(UserResponse::from(member)))
}

/// Remove a member from the organization.
#[utoipa::path(
    delete,
    path = "/api/v1/members/{id}",
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    ),
    tag = "members"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageMembers)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    if id == ctx.user_id {
        return Err(HttpAppError(AppError::BadRequest(
            "You cannot remove your own account".to_string(),
        )));
    }

    let removed = state
        .control
        .users
        .delete_member(id, organization_id)
        .await
        .map_err(HttpAppError::from)?;

    if !removed {
        return Err(HttpAppError(AppError::NotFound(
            "Member not found".to_string(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
