//! Repositories for the planning records: goals, KPIs, and projects.
//!
//! KPIs may reference a goal; the link is severed (set to NULL) when the
//! goal is deleted, so a KPI never points at a missing row.

use hrdesk_core::{
    models::{
        Goal, GoalPatch, Kpi, KpiPatch, NewGoal, NewKpi, NewProject, Project, ProjectPatch,
    },
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const GOAL_COLUMNS: &str =
    "id, organization_id, title, description, target_date, status, created_at, updated_at";
const KPI_COLUMNS: &str = "id, organization_id, goal_id, name, unit, target_value, \
                           current_value, created_at, updated_at";
const PROJECT_COLUMNS: &str = "id, organization_id, name, description, start_date, end_date, \
                               status, created_at, updated_at";

#[derive(Clone)]
pub struct GoalRepository {
    pool: PgPool,
}

impl GoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "goals", db.operation = "insert", db.organization_id = %organization_id))]
    pub async fn create(&self, organization_id: Uuid, new: &NewGoal) -> Result<Goal, AppError> {
        let goal = sqlx::query_as::<Postgres, Goal>(&format!(
            "INSERT INTO goals (organization_id, title, description, target_date, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {GOAL_COLUMNS}"
        ))
        .bind(organization_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.target_date)
        .bind(new.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(goal)
    }

    #[tracing::instrument(skip(self), fields(db.table = "goals", db.operation = "select", db.organization_id = %organization_id))]
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Goal>, AppError> {
        let goals = sqlx::query_as::<Postgres, Goal>(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE organization_id = $1 ORDER BY created_at DESC"
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(goals)
    }

    #[tracing::instrument(skip(self), fields(db.table = "goals", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid, organization_id: Uuid) -> Result<Option<Goal>, AppError> {
        let goal = sqlx::query_as::<Postgres, Goal>(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE id = $1 AND organization_id = $2"
        ))
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(goal)
    }

    #[tracing::instrument(skip(self, patch), fields(db.table = "goals", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        organization_id: Uuid,
        patch: &GoalPatch,
    ) -> Result<Option<Goal>, AppError> {
        let goal = sqlx::query_as::<Postgres, Goal>(&format!(
            "UPDATE goals SET \
                 title = COALESCE($3, title), \
                 description = COALESCE($4, description), \
                 target_date = COALESCE($5, target_date), \
                 status = COALESCE($6, status), \
                 updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {GOAL_COLUMNS}"
        ))
        .bind(id)
        .bind(organization_id)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.target_date)
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(goal)
    }

    #[tracing::instrument(skip(self), fields(db.table = "goals", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid, organization_id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM goals WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

#[derive(Clone)]
pub struct KpiRepository {
    pool: PgPool,
}

impl KpiRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The referenced goal, when given, must belong to the same organization.
    #[tracing::instrument(skip(self, new), fields(db.table = "kpis", db.operation = "insert", db.organization_id = %organization_id))]
    pub async fn create(&self, organization_id: Uuid, new: &NewKpi) -> Result<Kpi, AppError> {
        if let Some(goal_id) = new.goal_id {
            self.ensure_goal_in_org(goal_id, organization_id).await?;
        }

        let kpi = sqlx::query_as::<Postgres, Kpi>(&format!(
            "INSERT INTO kpis (organization_id, goal_id, name, unit, target_value, current_value) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {KPI_COLUMNS}"
        ))
        .bind(organization_id)
        .bind(new.goal_id)
        .bind(&new.name)
        .bind(&new.unit)
        .bind(new.target_value)
        .bind(new.current_value)
        .fetch_one(&self.pool)
        .await?;

        Ok(kpi)
    }

    #[tracing::instrument(skip(self), fields(db.table = "kpis", db.operation = "select", db.organization_id = %organization_id))]
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Kpi>, AppError> {
        let kpis = sqlx::query_as::<Postgres, Kpi>(&format!(
            "SELECT {KPI_COLUMNS} FROM kpis WHERE organization_id = $1 ORDER BY created_at DESC"
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(kpis)
    }

    #[tracing::instrument(skip(self), fields(db.table = "kpis", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid, organization_id: Uuid) -> Result<Option<Kpi>, AppError> {
        let kpi = sqlx::query_as::<Postgres, Kpi>(&format!(
            "SELECT {KPI_COLUMNS} FROM kpis WHERE id = $1 AND organization_id = $2"
        ))
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(kpi)
    }

    #[tracing::instrument(skip(self, patch), fields(db.table = "kpis", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        organization_id: Uuid,
        patch: &KpiPatch,
    ) -> Result<Option<Kpi>, AppError> {
        if let Some(goal_id) = patch.goal_id {
            self.ensure_goal_in_org(goal_id, organization_id).await?;
        }

        let kpi = sqlx::query_as::<Postgres, Kpi>(&format!(
            "UPDATE kpis SET \
                 goal_id = COALESCE($3, goal_id), \
                 name = COALESCE($4, name), \
                 unit = COALESCE($5, unit), \
                 target_value = COALESCE($6, target_value), \
                 current_value = COALESCE($7, current_value), \
                 updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {KPI_COLUMNS}"
        ))
        .bind(id)
        .bind(organization_id)
        .bind(patch.goal_id)
        .bind(&patch.name)
        .bind(&patch.unit)
        .bind(patch.target_value)
        .bind(patch.current_value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(kpi)
    }

    #[tracing::instrument(skip(self), fields(db.table = "kpis", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid, organization_id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM kpis WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn ensure_goal_in_org(&self, goal_id: Uuid, organization_id: Uuid) -> Result<(), AppError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM goals WHERE id = $1 AND organization_id = $2)",
        )
        .bind(goal_id)
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;

        if !exists.0 {
            return Err(AppError::InvalidInput(
                "Referenced goal does not exist in this organization".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "projects", db.operation = "insert", db.organization_id = %organization_id))]
    pub async fn create(
        &self,
        organization_id: Uuid,
        new: &NewProject,
    ) -> Result<Project, AppError> {
        let project = sqlx::query_as::<Postgres, Project>(&format!(
            "INSERT INTO projects (organization_id, name, description, start_date, end_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(organization_id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    #[tracing::instrument(skip(self), fields(db.table = "projects", db.operation = "select", db.organization_id = %organization_id))]
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<Postgres, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE organization_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    #[tracing::instrument(skip(self), fields(db.table = "projects", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid, organization_id: Uuid) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<Postgres, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 AND organization_id = $2"
        ))
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    #[tracing::instrument(skip(self, patch), fields(db.table = "projects", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        organization_id: Uuid,
        patch: &ProjectPatch,
    ) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<Postgres, Project>(&format!(
            "UPDATE projects SET \
                 name = COALESCE($3, name), \
                 description = COALESCE($4, description), \
                 start_date = COALESCE($5, start_date), \
                 end_date = COALESCE($6, end_date), \
                 status = COALESCE($7, status), \
                 updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .bind(organization_id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(patch.start_date)
        .bind(patch.end_date)
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    #[tracing::instrument(skip(self), fields(db.table = "projects", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid, organization_id: Uuid) -> Result<bool, AppError> {
        let rows_affected =
            sqlx::query("DELETE FROM projects WHERE id = $1 AND organization_id = $2")
                .bind(id)
                .bind(organization_id)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(rows_affected > 0)
    }
}
