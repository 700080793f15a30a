//! Task board handlers.

use crate::auth::models::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use hrdesk_core::{
    models::{NewTask, Task, TaskPatch},
    AppError, Permission,
};
use std::sync::Arc;
use uuid::Uuid;

/// List tasks of the caller's organization.
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    responses(
        (status = 200, description = "Tasks", body = [Task]),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "tasks"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ViewTasks)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let tasks = state
        .records
        .tasks
        .list(organization_id)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(tasks))
}

/// Get a single task.
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task", body = Task),
        (status = 404, description = "Task not found", body = crate::error::ErrorResponse)
    ),
    tag = "tasks"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ViewTasks)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let task = state
        .records
        .tasks
        .get(id, organization_id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Task not found".to_string())))?;

    Ok(Json(task))
}

/// Create a task.
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = NewTask,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "tasks"
)]
#[tracing::instrument(skip(state, ctx, new))]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(new): ValidatedJson<NewTask>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageTasks)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let task = state
        .records
        .tasks
        .create(organization_id, &new)
        .await
        .map_err(HttpAppError::from)?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Update a task. Absent fields keep their current values.
#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    request_body = TaskPatch,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 404, description = "Task not found", body = crate::error::ErrorResponse)
    ),
    tag = "tasks"
)]
#[tracing::instrument(skip(state, ctx, patch))]
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(patch): ValidatedJson<TaskPatch>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageTasks)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let task = state
        .records
        .tasks
        .update(id, organization_id, &patch)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Task not found".to_string())))?;

    Ok(Json(task))
}

/// Delete a task.
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Task not found", body = crate::error::ErrorResponse)
    ),
    tag = "tasks"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManageTasks)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let deleted = state
        .records
        .tasks
        .delete(id, organization_id)
        .await
        .map_err(HttpAppError::from)?;

    if !deleted {
        return Err(HttpAppError(AppError::NotFound(
            "Task not found".to_string(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
