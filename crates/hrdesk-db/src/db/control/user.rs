use hrdesk_core::{models::User, AppError, Role};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, organization_id, email, full_name, password_hash, role, \
                            is_active, last_sign_in_at, created_at, updated_at";

/// Repository for user identities across all organizations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.record_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.organization_id = %organization_id))]
    pub async fn list_by_organization(&self, organization_id: Uuid) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<Postgres, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE organization_id = $1 ORDER BY created_at ASC"
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "update", db.record_id = %id))]
    pub async fn update_last_sign_in(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_sign_in_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Change a member's role within their organization.
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "update", db.record_id = %id))]
    pub async fn set_role(
        &self,
        id: Uuid,
        organization_id: Uuid,
        role: Role,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(&format!(
            "UPDATE users SET role = $3, updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(organization_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Activate or deactivate a member within their organization.
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "update", db.record_id = %id))]
    pub async fn set_active(
        &self,
        id: Uuid,
        organization_id: Uuid,
        is_active: bool,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(&format!(
            "UPDATE users SET is_active = $3, updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(organization_id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "delete", db.record_id = %id))]
    pub async fn delete_member(&self, id: Uuid, organization_id: Uuid) -> Result<bool, AppError> {
        let rows_affected =
            sqlx::query("DELETE FROM users WHERE id = $1 AND organization_id = $2")
                .bind(id)
                .bind(organization_id)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Create the platform super-admin if no user exists for the configured
    /// email. Runs at startup, so it has to be idempotent.
    #[tracing::instrument(skip(self, password_hash), fields(db.table = "users", db.operation = "insert"))]
    pub async fn ensure_super_admin(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        if let Some(existing) = self.get_by_email(email).await? {
            return Ok(existing);
        }

        let user = sqlx::query_as::<Postgres, User>(&format!(
            "INSERT INTO users (organization_id, email, full_name, password_hash, role) \
             VALUES (NULL, $1, 'Platform Administrator', $2, $3) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .bind(Role::SuperAdmin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Super admin already exists"))?;

        Ok(user)
    }
}
