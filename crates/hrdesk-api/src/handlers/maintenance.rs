//! Maintenance request handlers.
//!
//! Any member may submit and browse requests; triage (status, priority,
//! deletion) is reserved for managers and admins.

use crate::auth::models::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use hrdesk_core::{
    models::{MaintenanceRequest, MaintenanceRequestPatch, NewMaintenanceRequest},
    AppError, Permission,
};
use std::sync::Arc;
use uuid::Uuid;

/// List maintenance requests of the caller's organization.
#[utoipa::path(
    get,
    path = "/api/v1/maintenance",
    responses(
        (status = 200, description = "Maintenance requests", body = [MaintenanceRequest]),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "maintenance"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_requests(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::SubmitMaintenance)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let requests = state
        .records
        .maintenance
        .list(organization_id)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(requests))
}

/// Get a single maintenance request.
#[utoipa::path(
    get,
    path = "/api/v1/maintenance/{id}",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request", body = MaintenanceRequest),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    ),
    tag = "maintenance"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_request(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::SubmitMaintenance)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let request = state
        .records
        .maintenance
        .get(id, organization_id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Request not found".to_string())))?;

    Ok(Json(request))
}

/// Submit a maintenance request. The caller is recorded as the requester.
#[utoipa::path(
    post,
    path = "/api/v1/maintenance",
    request_body = NewMaintenanceRequest,
    responses(
        (status = 201, description = "Request submitted", body = MaintenanceRequest),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "maintenance"
)]
#[tracing::instrument(skip(state, ctx, new))]
pub async fn create_request(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(new): ValidatedJson<NewMaintenanceRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::SubmitMaintenance)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let request = state
        .records
        .maintenance
        .create(organization_id, ctx.user_id, &new)
        .await
        .map_err(HttpAppError::from)?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// Update a maintenance request (triage). Absent fields keep their values.
#[utoipa::path(
    put,
    path = "/api/v1/maintenance/{id}",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = MaintenanceRequestPatch,
    responses(
        (status = 200, description = "Request updated", body = MaintenanceRequest),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    ),
    tag = "maintenance"
)]
#[tracing::instrument(skip(state, ctx, patch))]
pub async fn update_request(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(patch): ValidatedJson<MaintenanceRequestPatch>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageMaintenance)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let request = state
        .records
        .maintenance
        .update(id, organization_id, &patch)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Request not found".to_string())))?;

    Ok(Json(request))
}

/// Delete a maintenance request.
#[utoipa::path(
    delete,
    path = "/api/v1/maintenance/{id}",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    ),
    tag = "maintenance"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_request(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageMaintenance)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let deleted = state
        .records
        .maintenance
        .delete(id, organization_id)
        .await
        .map_err(HttpAppError::from)?;

    if !deleted {
        return Err(HttpAppError(AppError::NotFound(
            "Request not found".to_string(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
