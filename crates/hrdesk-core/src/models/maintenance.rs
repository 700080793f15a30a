use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "maintenance_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "maintenance_priority", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum MaintenancePriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Maintenance request raised by a member; tracked through a small
/// open/in_progress/resolved/closed lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub priority: MaintenancePriority,
    pub status: MaintenanceStatus,
    pub requested_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewMaintenanceRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub priority: MaintenancePriority,
}

/// Partial update; absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct MaintenanceRequestPatch {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub priority: Option<MaintenancePriority>,
    pub status: Option<MaintenanceStatus>,
}
