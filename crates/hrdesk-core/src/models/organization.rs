use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Organization status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "organization_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationStatus {
    #[default]
    Active,
    Suspended,
}

/// Organization (tenant) entity. Groups its own users and domain records;
/// every query against domain tables is scoped by organization id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub status: OrganizationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Organization row with the derived member count, as returned by the
/// super-admin directory listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrganizationWithCount {
    pub id: Uuid,
    pub name: String,
    pub status: OrganizationStatus,
    pub user_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_status_serde() {
        let json = serde_json::to_string(&OrganizationStatus::Suspended).unwrap();
        assert_eq!(json, "\"suspended\"");
        let status: OrganizationStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, OrganizationStatus::Active);
    }
}
