//! Driver authorization handlers.

use crate::auth::models::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use hrdesk_core::{
    models::{DriverAuthorization, DriverAuthorizationPatch, NewDriverAuthorization},
    AppError, Permission,
};
use std::sync::Arc;
use uuid::Uuid;

/// List driver authorizations of the caller's organization, soonest
/// expiry first.
#[utoipa::path(
    get,
    path = "/api/v1/driver-authorizations",
    responses(
        (status = 200, description = "Driver authorizations", body = [DriverAuthorization]),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "vehicles"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_authorizations(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ViewVehicles)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let authorizations = state
        .records
        .driver_authorizations
        .list(organization_id)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(authorizations))
}

/// Get a single driver authorization.
#[utoipa::path(
    get,
    path = "/api/v1/driver-authorizations/{id}",
    params(("id" = Uuid, Path, description = "Authorization ID")),
    responses(
        (status = 200, description = "Authorization", body = DriverAuthorization),
        (status = 404, description = "Authorization not found", body = crate::error::ErrorResponse)
    ),
    tag = "vehicles"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_authorization(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ViewVehicles)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let authorization = state
        .records
        .driver_authorizations
        .get(id, organization_id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Authorization not found".to_string())))?;

    Ok(Json(authorization))
}

/// Create a driver authorization. The validity window must not end before
/// it starts.
#[utoipa::path(
    post,
    path = "/api/v1/driver-authorizations",
    request_body = NewDriverAuthorization,
    responses(
        (status = 201, description = "Authorization created", body = DriverAuthorization),
        (status = 400, description = "Invalid validity window", body = crate::error::ErrorResponse)
    ),
    tag = "vehicles"
)]
#[tracing::instrument(skip(state, ctx, new))]
pub async fn create_authorization(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(new): ValidatedJson<NewDriverAuthorization>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageVehicles)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    if !new.window_is_valid() {
        return Err(HttpAppError(AppError::BadRequest(
            "Validity window must not end before it starts".to_string(),
        )));
    }

    let authorization = state
        .records
        .driver_authorizations
        .create(organization_id, &new)
        .await
        .map_err(HttpAppError::from)?;

    Ok((StatusCode::CREATED, Json(authorization)))
}

/// Update a driver authorization. Absent fields keep their current values;
/// the resulting validity window is re-checked against the stored row.
#[utoipa::path(
    put,
    path = "/api/v1/driver-authorizations/{id}",
    params(("id" = Uuid, Path, description = "Authorization ID")),
    request_body = DriverAuthorizationPatch,
    responses(
        (status = 200, description = "Authorization updated", body = DriverAuthorization),
        (status = 400, description = "Invalid validity window", body = crate::error::ErrorResponse),
        (status = 404, description = "Authorization not found", body = crate::error::ErrorResponse)
    ),
    tag = "vehicles"
)]
#[tracing::instrument(skip(state, ctx, patch))]
pub async fn update_authorization(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(patch): ValidatedJson<DriverAuthorizationPatch>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageVehicles)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    if patch.valid_from.is_some() || patch.valid_until.is_some() {
        let current = state
            .records
            .driver_authorizations
            .get(id, organization_id)
            .await
            .map_err(HttpAppError::from)?
            .ok_or_else(|| {
                HttpAppError(AppError::NotFound("Authorization not found".to_string()))
            })?;

        let valid_from = patch.valid_from.unwrap_or(current.valid_from);
        let valid_until = patch.valid_until.unwrap_or(current.valid_until);
        if valid_until < valid_from {
            return Err(HttpAppError(AppError::BadRequest(
                "Validity window must not end before it starts".to_string(),
            )));
        }
    }

    let authorization = state
        .records
        .driver_authorizations
        .update(id, organization_id, &patch)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Authorization not found".to_string())))?;

    Ok(Json(authorization))
}

/// Delete a driver authorization.
#[utoipa::path(
    delete,
    path = "/api/v1/driver-authorizations/{id}",
    params(("id" = Uuid, Path, description = "Authorization ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Authorization not found", body = crate::error::ErrorResponse)
    ),
    tag = "vehicles"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_authorization(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageVehicles)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let deleted = state
        .records
        .driver_authorizations
        .delete(id, organization_id)
        .await
        .map_err(HttpAppError::from)?;

    if !deleted {
        return Err(HttpAppError(AppError::NotFound(
            "Authorization not found".to_string(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
