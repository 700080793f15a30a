use crate::permissions::Role;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// How long an invite stays redeemable after issuance.
pub const INVITE_EXPIRY_DAYS: i64 = 7;

/// Pending invitation into an organization. Single use: the row is deleted
/// inside the redemption transaction, so a token never resolves twice.
/// Expiry is checked at redemption time only; there is no background sweeper.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrganizationInvite {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub token: String,
    pub invited_by: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OrganizationInvite {
    /// Expiry timestamp for an invite issued at `now`.
    pub fn expiry_from(now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(INVITE_EXPIRY_DAYS)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Invite shape returned by the API. The token is only returned at issuance
/// time, never from listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InviteResponse {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<OrganizationInvite> for InviteResponse {
    fn from(invite: OrganizationInvite) -> Self {
        Self {
            id: invite.id,
            organization_id: invite.organization_id,
            email: invite.email,
            role: invite.role,
            expires_at: invite.expires_at,
            created_at: invite.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite_expiring_at(expires_at: DateTime<Utc>) -> OrganizationInvite {
        OrganizationInvite {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            email: "new@example.com".to_string(),
            role: Role::Employee,
            token: "t".repeat(64),
            invited_by: Uuid::new_v4(),
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_expiry_is_seven_days_out() {
        let now = Utc::now();
        assert_eq!(OrganizationInvite::expiry_from(now), now + Duration::days(7));
    }

    #[test]
    fn test_expired_eight_days_later() {
        let issued = Utc::now();
        let invite = invite_expiring_at(OrganizationInvite::expiry_from(issued));
        assert!(invite.is_expired_at(issued + Duration::days(8)));
        assert!(!invite.is_expired_at(issued + Duration::days(6)));
    }

    #[test]
    fn test_token_not_serialized_in_listing() {
        let invite = invite_expiring_at(Utc::now());
        let json = serde_json::to_string(&invite).unwrap();
        assert!(!json.contains(&"t".repeat(64)));
    }
}
