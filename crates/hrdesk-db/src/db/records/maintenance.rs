use hrdesk_core::{
    models::{MaintenanceRequest, MaintenanceRequestPatch, NewMaintenanceRequest},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const COLUMNS: &str = "id, organization_id, title, description, location, priority, status, \
                       requested_by, created_at, updated_at";

/// Repository for maintenance requests.
#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "maintenance_requests", db.operation = "insert", db.organization_id = %organization_id))]
    pub async fn create(
        &self,
        organization_id: Uuid,
        requested_by: Uuid,
        new: &NewMaintenanceRequest,
    ) -> Result<MaintenanceRequest, AppError> {
        let request = sqlx::query_as::<Postgres, MaintenanceRequest>(&format!(
            "INSERT INTO maintenance_requests \
                 (organization_id, title, description, location, priority, requested_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        ))
        .bind(organization_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.location)
        .bind(new.priority)
        .bind(requested_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    #[tracing::instrument(skip(self), fields(db.table = "maintenance_requests", db.operation = "select", db.organization_id = %organization_id))]
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<MaintenanceRequest>, AppError> {
        let requests = sqlx::query_as::<Postgres, MaintenanceRequest>(&format!(
            "SELECT {COLUMNS} FROM maintenance_requests \
             WHERE organization_id = $1 ORDER BY created_at DESC"
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    #[tracing::instrument(skip(self), fields(db.table = "maintenance_requests", db.operation = "select", db.record_id = %id))]
    pub async fn get(
        &self,
        id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<MaintenanceRequest>, AppError> {
        let request = sqlx::query_as::<Postgres, MaintenanceRequest>(&format!(
            "SELECT {COLUMNS} FROM maintenance_requests WHERE id = $1 AND organization_id = $2"
        ))
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    #[tracing::instrument(skip(self, patch), fields(db.table = "maintenance_requests", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        organization_id: Uuid,
        patch: &MaintenanceRequestPatch,
    ) -> Result<Option<MaintenanceRequest>, AppError> {
        let request = sqlx::query_as::<Postgres, MaintenanceRequest>(&format!(
            "UPDATE maintenance_requests SET \
                 title = COALESCE($3, title), \
                 description = COALESCE($4, description), \
                 location = COALESCE($5, location), \
                 priority = COALESCE($6, priority), \
                 status = COALESCE($7, status), \
                 updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(organization_id)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.location)
        .bind(patch.priority)
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    #[tracing::instrument(skip(self), fields(db.table = "maintenance_requests", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid, organization_id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query(
            "DELETE FROM maintenance_requests WHERE id = $1 AND organization_id = $2",
        )
        .bind(id)
        .bind(organization_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }
}
