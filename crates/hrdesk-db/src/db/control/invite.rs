use chrono::Utc;
use hrdesk_core::{
    models::{Organization, OrganizationInvite, OrganizationStatus, User},
    AppError, Role,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const INVITE_COLUMNS: &str = "id, organization_id, email, role, token, invited_by, \
                              expires_at, created_at";

/// Repository for organization invites, including the transactional
/// redemption that turns an invite into a member.
#[derive(Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an invite with the given token. Returns `Ok(None)` when the
    /// token collides with an existing one, so the caller can regenerate
    /// and retry. Any other unique violation (duplicate pending invite for
    /// the same email) surfaces as a Conflict.
    #[tracing::instrument(skip(self, token), fields(db.table = "organization_invites", db.operation = "insert"))]
    pub async fn try_create(
        &self,
        organization_id: Uuid,
        email: &str,
        role: Role,
        token: &str,
        invited_by: Uuid,
        expires_at: chrono::DateTime<Utc>,
    ) -> Result<Option<OrganizationInvite>, AppError> {
        let result = sqlx::query_as::<Postgres, OrganizationInvite>(&format!(
            "INSERT INTO organization_invites (organization_id, email, role, token, invited_by, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {INVITE_COLUMNS}"
        ))
        .bind(organization_id)
        .bind(email)
        .bind(role)
        .bind(token)
        .bind(invited_by)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(invite) => Ok(Some(invite)),
            Err(sqlx::Error::Database(db_err))
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("organization_invites_token_key") =>
            {
                Ok(None)
            }
            Err(e) => Err(AppError::conflict_on_unique(
                e,
                "A pending invite for this email already exists",
            )),
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "organization_invites", db.operation = "select", db.organization_id = %organization_id))]
    pub async fn list_by_organization(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<OrganizationInvite>, AppError> {
        let invites = sqlx::query_as::<Postgres, OrganizationInvite>(&format!(
            "SELECT {INVITE_COLUMNS} FROM organization_invites \
             WHERE organization_id = $1 ORDER BY created_at DESC"
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invites)
    }

    #[tracing::instrument(skip(self), fields(db.table = "organization_invites", db.operation = "select", db.record_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<OrganizationInvite>, AppError> {
        let invite = sqlx::query_as::<Postgres, OrganizationInvite>(&format!(
            "SELECT {INVITE_COLUMNS} FROM organization_invites WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invite)
    }

    /// Revoke a pending invite within its organization.
    #[tracing::instrument(skip(self), fields(db.table = "organization_invites", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid, organization_id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query(
            "DELETE FROM organization_invites WHERE id = $1 AND organization_id = $2",
        )
        .bind(id)
        .bind(organization_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Redeem an invite token: look it up with a row lock, verify it has not
    /// expired and its organization is still active, create the member, and
    /// consume the invite, all in one transaction. The row lock means two
    /// concurrent redemptions of the same token serialize, and the loser
    /// observes the invite as already gone.
    ///
    /// An unknown token and an expired one return different errors: the
    /// expired case carries its `expires_at` so callers can say when.
    #[tracing::instrument(skip(self, token, password_hash), fields(db.table = "organization_invites", db.operation = "update"))]
    pub async fn redeem(
        &self,
        token: &str,
        full_name: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let invite = sqlx::query_as::<Postgres, OrganizationInvite>(&format!(
            "SELECT {INVITE_COLUMNS} FROM organization_invites WHERE token = $1 FOR UPDATE"
        ))
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::InviteInvalid)?;

        if invite.is_expired_at(Utc::now()) {
            return Err(AppError::InviteExpired {
                expired_at: invite.expires_at,
            });
        }

        let organization = sqlx::query_as::<Postgres, Organization>(
            "SELECT id, name, status, created_at, updated_at FROM organizations WHERE id = $1",
        )
        .bind(invite.organization_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::InviteInvalid)?;

        if organization.status != OrganizationStatus::Active {
            return Err(AppError::OrganizationSuspended(organization.name));
        }

        let user = sqlx::query_as::<Postgres, User>(
            "INSERT INTO users (organization_id, email, full_name, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, organization_id, email, full_name, password_hash, role, \
                       is_active, last_sign_in_at, created_at, updated_at",
        )
        .bind(invite.organization_id)
        .bind(&invite.email)
        .bind(full_name)
        .bind(password_hash)
        .bind(invite.role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::conflict_on_unique(e, "A user with this email already exists")
        })?;

        sqlx::query("DELETE FROM organization_invites WHERE id = $1")
            .bind(invite.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(user)
    }
}
