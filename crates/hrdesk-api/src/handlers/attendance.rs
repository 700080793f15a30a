//! Weekly attendance schedule handlers.

use crate::auth::models::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use hrdesk_core::{
    models::{AttendanceSchedule, AttendanceSchedulePatch, NewAttendanceSchedule},
    AppError, Permission,
};
use std::sync::Arc;
use uuid::Uuid;

/// List the attendance schedules of the caller's organization.
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    responses(
        (status = 200, description = "Attendance schedules", body = [AttendanceSchedule]),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "attendance"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ViewAttendance)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let schedules = state
        .records
        .attendance
        .list(organization_id)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(schedules))
}

/// Get a single attendance schedule.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{id}",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule", body = AttendanceSchedule),
        (status = 404, description = "Schedule not found", body = crate::error::ErrorResponse)
    ),
    tag = "attendance"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ViewAttendance)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let schedule = state
        .records
        .attendance
        .get(id, organization_id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Schedule not found".to_string())))?;

    Ok(Json(schedule))
}

/// Create an attendance schedule entry.
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = NewAttendanceSchedule,
    responses(
        (status = 201, description = "Schedule created", body = AttendanceSchedule),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "attendance"
)]
#[tracing::instrument(skip(state, ctx, new))]
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(new): ValidatedJson<NewAttendanceSchedule>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageAttendance)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let schedule = state
        .records
        .attendance
        .create(organization_id, &new)
        .await
        .map_err(HttpAppError::from)?;

    Ok((StatusCode::CREATED, Json(schedule)))
}

/// Update an attendance schedule. Absent fields keep their current values.
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{id}",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    request_body = AttendanceSchedulePatch,
    responses(
        (status = 200, description = "Schedule updated", body = AttendanceSchedule),
        (status = 404, description = "Schedule not found", body = crate::error::ErrorResponse)
    ),
    tag = "attendance"
)]
#[tracing::instrument(skip(state, ctx, patch))]
pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(patch): ValidatedJson<AttendanceSchedulePatch>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageAttendance)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let schedule = state
        .records
        .attendance
        .update(id, organization_id, &patch)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Schedule not found".to_string())))?;

    Ok(Json(schedule))
}

/// Delete an attendance schedule.
#[utoipa::path(
    delete,
    path = "/api/v1/attendance/{id}",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Schedule not found", body = crate::error::ErrorResponse)
    ),
    tag = "attendance"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageAttendance)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let deleted = state
        .records
        .attendance
        .delete(id, organization_id)
        .await
        .map_err(HttpAppError::from)?;

    if !deleted {
        return Err(HttpAppError(AppError::NotFound(
            "Schedule not found".to_string(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
