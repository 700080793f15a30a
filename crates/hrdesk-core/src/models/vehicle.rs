use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "authorization_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    #[default]
    Active,
    Suspended,
    Expired,
}

/// Driver authorization: permission for a named driver to operate a vehicle
/// within a validity window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DriverAuthorization {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub driver_name: String,
    pub license_number: String,
    pub vehicle: Option<String>,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub status: AuthorizationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewDriverAuthorization {
    #[validate(length(min = 1, max = 200))]
    pub driver_name: String,
    #[validate(length(min = 1, max = 100))]
    pub license_number: String,
    pub vehicle: Option<String>,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    #[serde(default)]
    pub status: AuthorizationStatus,
}

impl NewDriverAuthorization {
    /// The validity window must not end before it starts.
    pub fn window_is_valid(&self) -> bool {
        self.valid_until >= self.valid_from
    }
}

/// Partial update; absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct DriverAuthorizationPatch {
    #[validate(length(min = 1, max = 200))]
    pub driver_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub license_number: Option<String>,
    pub vehicle: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub status: Option<AuthorizationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_rejects_inverted_dates() {
        let auth = NewDriverAuthorization {
            driver_name: "A. Driver".to_string(),
            license_number: "B-123".to_string(),
            vehicle: None,
            valid_from: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            status: AuthorizationStatus::Active,
        };
        assert!(!auth.window_is_valid());
    }

    #[test]
    fn test_window_accepts_single_day() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let auth = NewDriverAuthorization {
            driver_name: "A. Driver".to_string(),
            license_number: "B-123".to_string(),
            vehicle: None,
            valid_from: day,
            valid_until: day,
            status: AuthorizationStatus::Active,
        };
        assert!(auth.window_is_valid());
    }
}
