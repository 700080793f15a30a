use hrdesk_core::{
    models::{Organization, OrganizationStatus, OrganizationWithCount, User},
    AppError, Role,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for the organization (tenant) directory and lifecycle.
#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Provision an organization together with its admin user.
    ///
    /// Both inserts run in one transaction: a failure at either step rolls
    /// the whole provisioning back, so there is never an organization without
    /// an admin or an admin identity without an organization.
    #[tracing::instrument(skip(self, admin_password_hash), fields(db.table = "organizations", db.operation = "insert"))]
    pub async fn create_with_admin(
        &self,
        name: &str,
        status: OrganizationStatus,
        admin_full_name: &str,
        admin_email: &str,
        admin_password_hash: &str,
    ) -> Result<(Organization, User), AppError> {
        let mut tx = self.pool.begin().await?;

        let organization = sqlx::query_as::<Postgres, Organization>(
            r#"
            INSERT INTO organizations (name, status)
            VALUES ($1, $2)
            RETURNING id, name, status, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(status)
        .fetch_one(&mut *tx)
        .await?;

        let admin = sqlx::query_as::<Postgres, User>(
            r#"
            INSERT INTO users (organization_id, email, full_name, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, organization_id, email, full_name, password_hash, role,
                      is_active, last_sign_in_at, created_at, updated_at
            "#,
        )
        .bind(organization.id)
        .bind(admin_email)
        .bind(admin_full_name)
        .bind(admin_password_hash)
        .bind(Role::OrgAdmin)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "A user with this email already exists"))?;

        tx.commit().await?;

        Ok((organization, admin))
    }

    /// List all organizations with derived member counts (super-admin directory).
    #[tracing::instrument(skip(self), fields(db.table = "organizations", db.operation = "select"))]
    pub async fn list_with_counts(&self) -> Result<Vec<OrganizationWithCount>, AppError> {
        let organizations = sqlx::query_as::<Postgres, OrganizationWithCount>(
            r#"
            SELECT o.id, o.name, o.status,
                   (SELECT COUNT(*) FROM users u WHERE u.organization_id = o.id) AS user_count,
                   o.created_at, o.updated_at
            FROM organizations o
            ORDER BY o.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(organizations)
    }

    #[tracing::instrument(skip(self), fields(db.table = "organizations", db.operation = "select", db.record_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Organization>, AppError> {
        let organization = sqlx::query_as::<Postgres, Organization>(
            "SELECT id, name, status, created_at, updated_at FROM organizations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organization)
    }

    #[tracing::instrument(skip(self), fields(db.table = "organizations", db.operation = "select", db.record_id = %id))]
    pub async fn get_with_count(&self, id: Uuid) -> Result<Option<OrganizationWithCount>, AppError> {
        let organization = sqlx::query_as::<Postgres, OrganizationWithCount>(
            r#"
            SELECT o.id, o.name, o.status,
                   (SELECT COUNT(*) FROM users u WHERE u.organization_id = o.id) AS user_count,
                   o.created_at, o.updated_at
            FROM organizations o
            WHERE o.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organization)
    }

    /// Flip the active/suspended flag. Suspension is enforced at the auth
    /// boundary: members of a suspended organization fail authentication on
    /// their next request.
    #[tracing::instrument(skip(self), fields(db.table = "organizations", db.operation = "update", db.record_id = %id))]
    pub async fn set_status(
        &self,
        id: Uuid,
        status: OrganizationStatus,
    ) -> Result<Option<Organization>, AppError> {
        let organization = sqlx::query_as::<Postgres, Organization>(
            r#"
            UPDATE organizations SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organization)
    }

    /// Delete an organization and everything scoped to it: invites, then
    /// members, then the organization row, in one transaction. Domain record
    /// tables cascade via their foreign keys.
    #[tracing::instrument(skip(self), fields(db.table = "organizations", db.operation = "delete", db.record_id = %id))]
    pub async fn delete_cascade(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM organization_invites WHERE organization_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM users WHERE organization_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let rows_affected = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected > 0)
    }
}
