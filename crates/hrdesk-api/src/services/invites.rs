//! Invite issuance: token generation and collision handling.

use chrono::Utc;
use hrdesk_core::{
    models::{OrganizationInvite, User},
    AppError, Role,
};
use hrdesk_db::{InviteRepository, UserRepository};
use uuid::Uuid;

/// Invite tokens carry 256 bits of randomness, hex-encoded to 64 characters.
const INVITE_TOKEN_BYTES: usize = 32;

/// Attempts before giving up on finding an unused token. A collision on a
/// 256-bit token is effectively impossible, so more than one pass through the
/// loop indicates something is badly wrong.
const MAX_TOKEN_ATTEMPTS: usize = 4;

/// Generate a cryptographically random invite token.
pub fn generate_invite_token() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..INVITE_TOKEN_BYTES).map(|_| rng.random()).collect();
    hex::encode(random_bytes)
}

#[derive(Clone)]
pub struct InviteService {
    invites: InviteRepository,
    users: UserRepository,
}

impl InviteService {
    pub fn new(invites: InviteRepository, users: UserRepository) -> Self {
        Self { invites, users }
    }

    /// Issue an invite for the given email and role. The database's unique
    /// constraint is the arbiter of token uniqueness: on collision a fresh
    /// token is generated and the insert retried.
    pub async fn issue(
        &self,
        organization_id: Uuid,
        email: &str,
        role: Role,
        invited_by: Uuid,
    ) -> Result<OrganizationInvite, AppError> {
        if !role.is_org_scoped() {
            return Err(AppError::BadRequest(
                "Invites can only grant organization roles".to_string(),
            ));
        }

        if self.users.exists_by_email(email).await? {
            return Err(AppError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }

        let expires_at = OrganizationInvite::expiry_from(Utc::now());

        for _ in 0..MAX_TOKEN_ATTEMPTS {
            let token = generate_invite_token();
            if let Some(invite) = self
                .invites
                .try_create(organization_id, email, role, &token, invited_by, expires_at)
                .await?
            {
                return Ok(invite);
            }
            tracing::warn!("Invite token collision, regenerating");
        }

        Err(AppError::Internal(
            "Could not allocate a unique invite token".to_string(),
        ))
    }

    /// Redeem an invite token into a new member account.
    pub async fn accept(
        &self,
        token: &str,
        full_name: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        self.invites.redeem(token, full_name, password_hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_is_64_hex_chars() {
        let token = generate_invite_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_do_not_repeat() {
        let tokens: HashSet<String> = (0..1000).map(|_| generate_invite_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }
}
