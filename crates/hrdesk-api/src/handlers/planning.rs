//! Planning handlers: goals, KPIs, and projects.

use crate::auth::models::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use hrdesk_core::{
    models::{Goal, GoalPatch, Kpi, KpiPatch, NewGoal, NewKpi, NewProject, Project, ProjectPatch},
    AppError, Permission,
};
use std::sync::Arc;
use uuid::Uuid;

// Goals

#[utoipa::path(
    get,
    path = "/api/v1/goals",
    responses(
        (status = 200, description = "Goals", body = [Goal]),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ViewPlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let goals = state
        .records
        .goals
        .list(organization_id)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(goals))
}

#[utoipa::path(
    get,
    path = "/api/v1/goals/{id}",
    params(("id" = Uuid, Path, description = "Goal ID")),
    responses(
        (status = 200, description = "Goal", body = Goal),
        (status = 404, description = "Goal not found", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_goal(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ViewPlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let goal = state
        .records
        .goals
        .get(id, organization_id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Goal not found".to_string())))?;

    Ok(Json(goal))
}

#[utoipa::path(
    post,
    path = "/api/v1/goals",
    request_body = NewGoal,
    responses(
        (status = 201, description = "Goal created", body = Goal),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx, new))]
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(new): ValidatedJson<NewGoal>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManagePlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let goal = state
        .records
        .goals
        .create(organization_id, &new)
        .await
        .map_err(HttpAppError::from)?;

    Ok((StatusCode::CREATED, Json(goal)))
}

#[utoipa::path(
    put,
    path = "/api/v1/goals/{id}",
    params(("id" = Uuid, Path, description = "Goal ID")),
    request_body = GoalPatch,
    responses(
        (status = 200, description = "Goal updated", body = Goal),
        (status = 404, description = "Goal not found", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx, patch))]
pub async fn update_goal(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(patch): ValidatedJson<GoalPatch>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManagePlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let goal = state
        .records
        .goals
        .update(id, organization_id, &patch)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Goal not found".to_string())))?;

    Ok(Json(goal))
}

/// Delete a goal. KPIs linked to it survive with their linkage cleared.
#[utoipa::path(
    delete,
    path = "/api/v1/goals/{id}",
    params(("id" = Uuid, Path, description = "Goal ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Goal not found", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManagePlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let deleted = state
        .records
        .goals
        .delete(id, organization_id)
        .await
        .map_err(HttpAppError::from)?;

    if !deleted {
        return Err(HttpAppError(AppError::NotFound(
            "Goal not found".to_string(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

// KPIs

#[utoipa::path(
    get,
    path = "/api/v1/kpis",
    responses(
        (status = 200, description = "KPIs", body = [Kpi]),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_kpis(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ViewPlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let kpis = state
        .records
        .kpis
        .list(organization_id)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(kpis))
}

#[utoipa::path(
    get,
    path = "/api/v1/kpis/{id}",
    params(("id" = Uuid, Path, description = "KPI ID")),
    responses(
        (status = 200, description = "KPI", body = Kpi),
        (status = 404, description = "KPI not found", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_kpi(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ViewPlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let kpi = state
        .records
        .kpis
        .get(id, organization_id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("KPI not found".to_string())))?;

    Ok(Json(kpi))
}

/// Create a KPI. A linked goal must belong to the same organization.
#[utoipa::path(
    post,
    path = "/api/v1/kpis",
    request_body = NewKpi,
    responses(
        (status = 201, description = "KPI created", body = Kpi),
        (status = 400, description = "Linked goal not in organization", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx, new))]
pub async fn create_kpi(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(new): ValidatedJson<NewKpi>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManagePlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let kpi = state
        .records
        .kpis
        .create(organization_id, &new)
        .await
        .map_err(HttpAppError::from)?;

    Ok((StatusCode::CREATED, Json(kpi)))
}

#[utoipa::path(
    put,
    path = "/api/v1/kpis/{id}",
    params(("id" = Uuid, Path, description = "KPI ID")),
    request_body = KpiPatch,
    responses(
        (status = 200, description = "KPI updated", body = Kpi),
        (status = 404, description = "KPI not found", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx, patch))]
pub async fn update_kpi(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(patch): ValidatedJson<KpiPatch>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManagePlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let kpi = state
        .records
        .kpis
        .update(id, organization_id, &patch)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("KPI not found".to_string())))?;

    Ok(Json(kpi))
}

#[utoipa::path(
    delete,
    path = "/api/v1/kpis/{id}",
    params(("id" = Uuid, Path, description = "KPI ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "KPI not found", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_kpi(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManagePlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let deleted = state
        .records
        .kpis
        .delete(id, organization_id)
        .await
        .map_err(HttpAppError::from)?;

    if !deleted {
        return Err(HttpAppError(AppError::NotFound("KPI not found".to_string())));
    }

    Ok(StatusCode::NO_CONTENT)
}

// Projects

#[utoipa::path(
    get,
    path = "/api/v1/projects",
    responses(
        (status = 200, description = "Projects", body = [Project]),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ViewPlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let projects = state
        .records
        .projects
        .list(organization_id)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(projects))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project", body = Project),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ViewPlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let project = state
        .records
        .projects
        .get(id, organization_id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Project not found".to_string())))?;

    Ok(Json(project))
}

#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = NewProject,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx, new))]
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(new): ValidatedJson<NewProject>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManagePlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let project = state
        .records
        .projects
        .create(organization_id, &new)
        .await
        .map_err(HttpAppError::from)?;

    Ok((StatusCode::CREATED, Json(project)))
}

#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = ProjectPatch,
    responses(
        (status = 200, description = "Project updated", body = Project),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx, patch))]
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    ValidatedJson(patch): ValidatedJson<ProjectPatch>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManagePlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let project = state
        .records
        .projects
        .update(id, organization_id, &patch)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Project not found".to_string())))?;

    Ok(Json(project))
}

#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    ),
    tag = "planning"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require(Permission::ManagePlanning)
        .map_err(HttpAppError::from)?;
    let organization_id = ctx.org_id().map_err(HttpAppError::from)?;

    let deleted = state
        .records
        .projects
        .delete(id, organization_id)
        .await
        .map_err(HttpAppError::from)?;

    if !deleted {
        return Err(HttpAppError(AppError::NotFound(
            "Project not found".to_string(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
