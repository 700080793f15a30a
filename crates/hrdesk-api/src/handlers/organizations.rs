//! Organization directory and lifecycle handlers (super admin only).

use crate::auth::models::AuthContext;
use crate::auth::password::hash_password;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use hrdesk_core::{
    models::{Organization, OrganizationStatus, OrganizationWithCount, UserResponse},
    AppError, Permission,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub admin_full_name: String,
    #[validate(email)]
    pub admin_email: String,
    #[validate(length(min = 8))]
    pub admin_password: String,
    /// Initial status; new organizations default to active.
    #[serde(default)]
    pub status: OrganizationStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrganizationResponse {
    pub organization: Organization,
    pub admin: UserResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrganizationStatusRequest {
    pub status: OrganizationStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrganizationDetailResponse {
    #[serde(flatten)]
    pub organization: OrganizationWithCount,
    pub members: Vec<UserResponse>,
}

/// List all organizations with member counts.
#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    responses(
        (status = 200, description = "Organization directory", body = [OrganizationWithCount]),
        (status = 403, description = "Not a super admin", body = crate::error::ErrorResponse)
    ),
    tag = "organizations"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_organizations(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageOrganizations)
        .map_err(HttpAppError::from)?;

    let organizations = state
        .control
        .organizations
        .list_with_counts()
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(organizations))
}

/// Provision an organization together with its first admin. Both are created
/// in one transaction; a failure leaves nothing behind.
#[utoipa::path(
    post,
    path = "/api/v1/organizations",
    request_body = CreateOrganizationRequest,
    responses(
        (status = 201, description = "Organization provisioned", body = CreateOrganizationResponse),
        (status = 403, description = "Not a super admin", body = crate::error::ErrorResponse),
        (status = 409, description = "Admin email already in use", body = crate::error::ErrorResponse)
    ),
    tag = "organizations"
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn create_organization(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(request): ValidatedJson<CreateOrganizationRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageOrganizations)
        .map_err(HttpAppError::from)?;

    let password_hash = hash_password(&request.admin_password).map_err(HttpAppError::from)?;

    let (organization, admin) = state
        .control
        .organizations
        .create_with_admin(
            request.name.trim(),
            request.status,
            request.admin_full_name.trim(),
            &request.admin_email,
            &password_hash,
        )
        .await
        .map_err(HttpAppError::from)?;

    tracing::info!(organization_id = %organization.id, "Organization provisioned");

    Ok((
        StatusCode::CREATED,
        Json(CreateOrganizationResponse {
            organization,
            admin: UserResponse::from(admin),
        }),
    ))
}

/// Get a single organization with its member count and member list.
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{id}",
    params(("id" = Uuid, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization", body = OrganizationDetailResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    ),
    tag = "organizations"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_organization(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageOrganizations)
        .map_err(HttpAppError::from)?;

    let organization = state
        .control
        .organizations
        .get_with_count(id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| {
            HttpAppError(AppError::OrganizationNotFound(format!(
                "No organization with id {}",
                id
            )))
        })?;

    let members = state
        .control
        .users
        .list_by_organization(id)
        .await
        .map_err(HttpAppError::from)?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(OrganizationDetailResponse {
        organization,
        members,
    }))
}

/// Activate or suspend an organization. Suspension takes effect on members'
/// next request; no tokens are revoked eagerly.
#[utoipa::path(
    put,
    path = "/api/v1/organizations/{id}/status",
    params(("id" = Uuid, Path, description = "Organization ID")),
    request_body = UpdateOrganizationStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Organization),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    ),
    tag = "organizations"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn set_organization_status(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrganizationStatusRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageOrganizations)
        .map_err(HttpAppError::from)?;

    let organization = state
        .control
        .organizations
        .set_status(id, request.status)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| {
            HttpAppError(AppError::OrganizationNotFound(format!(
                "No organization with id {}",
                id
            )))
        })?;

    tracing::info!(organization_id = %id, status = ?request.status, "Organization status changed");

    Ok(Json(organization))
}

/// Delete an organization and everything scoped to it.
#[utoipa::path(
    delete,
    path = "/api/v1/organizations/{id}",
    params(("id" = Uuid, Path, description = "Organization ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    ),
    tag = "organizations"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_organization(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageOrganizations)
        .map_err(HttpAppError::from)?;

    let deleted = state
        .control
        .organizations
        .delete_cascade(id)
        .await
        .map_err(HttpAppError::from)?;

    if !deleted {
        return Err(HttpAppError(AppError::OrganizationNotFound(format!(
            "No organization with id {}",
            id
        ))));
    }

    tracing::info!(organization_id = %id, "Organization deleted");

    Ok(StatusCode::NO_CONTENT)
}
