use hrdesk_core::{
    models::{DriverAuthorization, DriverAuthorizationPatch, NewDriverAuthorization},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const COLUMNS: &str = "id, organization_id, driver_name, license_number, vehicle, valid_from, \
                       valid_until, status, created_at, updated_at";

/// Repository for driver authorizations.
#[derive(Clone)]
pub struct DriverAuthorizationRepository {
    pool: PgPool,
}

impl DriverAuthorizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "driver_authorizations", db.operation = "insert", db.organization_id = %organization_id))]
    pub async fn create(
        &self,
        organization_id: Uuid,
        new: &NewDriverAuthorization,
    ) -> Result<DriverAuthorization, AppError> {
        let authorization = sqlx::query_as::<Postgres, DriverAuthorization>(&format!(
            "INSERT INTO driver_authorizations \
                 (organization_id, driver_name, license_number, vehicle, valid_from, valid_until, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        ))
        .bind(organization_id)
        .bind(&new.driver_name)
        .bind(&new.license_number)
        .bind(&new.vehicle)
        .bind(new.valid_from)
        .bind(new.valid_until)
        .bind(new.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(authorization)
    }

    #[tracing::instrument(skip(self), fields(db.table = "driver_authorizations", db.operation = "select", db.organization_id = %organization_id))]
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<DriverAuthorization>, AppError> {
        let authorizations = sqlx::query_as::<Postgres, DriverAuthorization>(&format!(
            "SELECT {COLUMNS} FROM driver_authorizations \
             WHERE organization_id = $1 ORDER BY valid_until ASC"
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(authorizations)
    }

    #[tracing::instrument(skip(self), fields(db.table = "driver_authorizations", db.operation = "select", db.record_id = %id))]
    pub async fn get(
        &self,
        id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<DriverAuthorization>, AppError> {
        let authorization = sqlx::query_as::<Postgres, DriverAuthorization>(&format!(
            "SELECT {COLUMNS} FROM driver_authorizations WHERE id = $1 AND organization_id = $2"
        ))
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(authorization)
    }

    #[tracing::instrument(skip(self, patch), fields(db.table = "driver_authorizations", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        organization_id: Uuid,
        patch: &DriverAuthorizationPatch,
    ) -> Result<Option<DriverAuthorization>, AppError> {
        let authorization = sqlx::query_as::<Postgres, DriverAuthorization>(&format!(
            "UPDATE driver_authorizations SET \
                 driver_name = COALESCE($3, driver_name), \
                 license_number = COALESCE($4, license_number), \
                 vehicle = COALESCE($5, vehicle), \
                 valid_from = COALESCE($6, valid_from), \
                 valid_until = COALESCE($7, valid_until), \
                 status = COALESCE($8, status), \
                 updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(organization_id)
        .bind(&patch.driver_name)
        .bind(&patch.license_number)
        .bind(&patch.vehicle)
        .bind(patch.valid_from)
        .bind(patch.valid_until)
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(authorization)
    }

    #[tracing::instrument(skip(self), fields(db.table = "driver_authorizations", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid, organization_id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query(
            "DELETE FROM driver_authorizations WHERE id = $1 AND organization_id = $2",
        )
        .bind(id)
        .bind(organization_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }
}
