use hrdesk_core::{
    models::{AttendanceSchedule, AttendanceSchedulePatch, NewAttendanceSchedule},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const COLUMNS: &str = "id, organization_id, employee_name, weekday, check_in, check_out, \
                       status, notes, created_at, updated_at";

/// Repository for weekly attendance schedule entries.
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "attendance_schedules", db.operation = "insert", db.organization_id = %organization_id))]
    pub async fn create(
        &self,
        organization_id: Uuid,
        new: &NewAttendanceSchedule,
    ) -> Result<AttendanceSchedule, AppError> {
        let schedule = sqlx::query_as::<Postgres, AttendanceSchedule>(&format!(
            "INSERT INTO attendance_schedules \
                 (organization_id, employee_name, weekday, check_in, check_out, status, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        ))
        .bind(organization_id)
        .bind(&new.employee_name)
        .bind(new.weekday)
        .bind(new.check_in)
        .bind(new.check_out)
        .bind(new.status)
        .bind(&new.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(schedule)
    }

    #[tracing::instrument(skip(self), fields(db.table = "attendance_schedules", db.operation = "select", db.organization_id = %organization_id))]
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<AttendanceSchedule>, AppError> {
        let schedules = sqlx::query_as::<Postgres, AttendanceSchedule>(&format!(
            "SELECT {COLUMNS} FROM attendance_schedules \
             WHERE organization_id = $1 ORDER BY weekday ASC, check_in ASC"
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(schedules)
    }

    #[tracing::instrument(skip(self), fields(db.table = "attendance_schedules", db.operation = "select", db.record_id = %id))]
    pub async fn get(
        &self,
        id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<AttendanceSchedule>, AppError> {
        let schedule = sqlx::query_as::<Postgres, AttendanceSchedule>(&format!(
            "SELECT {COLUMNS} FROM attendance_schedules WHERE id = $1 AND organization_id = $2"
        ))
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule)
    }

    #[tracing::instrument(skip(self, patch), fields(db.table = "attendance_schedules", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        organization_id: Uuid,
        patch: &AttendanceSchedulePatch,
    ) -> Result<Option<AttendanceSchedule>, AppError> {
        let schedule = sqlx::query_as::<Postgres, AttendanceSchedule>(&format!(
            "UPDATE attendance_schedules SET \
                 employee_name = COALESCE($3, employee_name), \
                 weekday = COALESCE($4, weekday), \
                 check_in = COALESCE($5, check_in), \
                 check_out = COALESCE($6, check_out), \
                 status = COALESCE($7, status), \
                 notes = COALESCE($8, notes), \
                 updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(organization_id)
        .bind(&patch.employee_name)
        .bind(patch.weekday)
        .bind(patch.check_in)
        .bind(patch.check_out)
        .bind(patch.status)
        .bind(&patch.notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule)
    }

    #[tracing::instrument(skip(self), fields(db.table = "attendance_schedules", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid, organization_id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query(
            "DELETE FROM attendance_schedules WHERE id = $1 AND organization_id = $2",
        )
        .bind(id)
        .bind(organization_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }
}
