//! HS256 JWT signing and validation for session tokens.

use crate::auth::models::JwtClaims;
use chrono::{Duration, Utc};
use hrdesk_core::{models::User, AppError};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl JwtService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    /// Issue a token for the given user.
    pub fn sign(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user.id,
            organization_id: user.organization_id,
            role: user.role,
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validate and decode a token.
    pub fn verify(&self, token: &str) -> Result<JwtClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data =
            decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Unauthorized("Token has expired".to_string())
                    }
                    _ => AppError::Unauthorized("Invalid or expired token".to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrdesk_core::Role;
    use uuid::Uuid;

    const SECRET: &str = "test-secret-key-min-32-characters-long";

    fn test_user(role: Role, organization_id: Option<Uuid>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            organization_id,
            email: "member@example.com".to_string(),
            full_name: "Test Member".to_string(),
            password_hash: "hash".to_string(),
            role,
            is_active: true,
            last_sign_in_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_sign_and_verify_round_trip() {
        let service = JwtService::new(SECRET, 24);
        let org = Uuid::new_v4();
        let user = test_user(Role::Manager, Some(org));

        let token = service.sign(&user).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.organization_id, Some(org));
        assert_eq!(claims.role, Role::Manager);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_super_admin_claims_have_no_organization() {
        let service = JwtService::new(SECRET, 24);
        let user = test_user(Role::SuperAdmin, None);

        let claims = service.verify(&service.sign(&user).unwrap()).unwrap();
        assert_eq!(claims.organization_id, None);
        assert_eq!(claims.role, Role::SuperAdmin);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = JwtService::new(SECRET, 24);
        let other = JwtService::new("another-secret-key-also-32-chars-xx", 24);
        let user = test_user(Role::Employee, Some(Uuid::new_v4()));

        let token = service.sign(&user).unwrap();
        assert!(matches!(
            other.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative expiry puts `exp` in the past.
        let service = JwtService::new(SECRET, -1);
        let user = test_user(Role::Employee, Some(Uuid::new_v4()));

        let token = service.sign(&user).unwrap();
        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(ref msg) if msg.contains("expired")));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = JwtService::new(SECRET, 24);
        assert!(service.verify("not-a-jwt").is_err());
    }
}
