use hrdesk_core::{
    models::{NewTask, Task, TaskPatch},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const COLUMNS: &str =
    "id, organization_id, title, description, assignee, due_date, status, created_at, updated_at";

/// Repository for one-off tasks.
#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "tasks", db.operation = "insert", db.organization_id = %organization_id))]
    pub async fn create(&self, organization_id: Uuid, new: &NewTask) -> Result<Task, AppError> {
        let task = sqlx::query_as::<Postgres, Task>(&format!(
            "INSERT INTO tasks (organization_id, title, description, assignee, due_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        ))
        .bind(organization_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.assignee)
        .bind(new.due_date)
        .bind(new.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "select", db.organization_id = %organization_id))]
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<Postgres, Task>(&format!(
            "SELECT {COLUMNS} FROM tasks WHERE organization_id = $1 \
             ORDER BY due_date ASC NULLS LAST, created_at DESC"
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid, organization_id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<Postgres, Task>(&format!(
            "SELECT {COLUMNS} FROM tasks WHERE id = $1 AND organization_id = $2"
        ))
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    #[tracing::instrument(skip(self, patch), fields(db.table = "tasks", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        organization_id: Uuid,
        patch: &TaskPatch,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<Postgres, Task>(&format!(
            "UPDATE tasks SET \
                 title = COALESCE($3, title), \
                 description = COALESCE($4, description), \
                 assignee = COALESCE($5, assignee), \
                 due_date = COALESCE($6, due_date), \
                 status = COALESCE($7, status), \
                 updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(organization_id)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.assignee)
        .bind(patch.due_date)
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid, organization_id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM tasks WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
