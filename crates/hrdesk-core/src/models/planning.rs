//! Organizational planning records: goals, KPIs, and projects.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "goal_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Draft,
    Active,
    Achieved,
    Abandoned,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Goal {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Key performance indicator, optionally linked to a goal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Kpi {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub goal_id: Option<Uuid>,
    pub name: String,
    pub unit: Option<String>,
    pub target_value: f64,
    pub current_value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "project_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planned,
    Active,
    Completed,
    OnHold,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Project {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewGoal {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: GoalStatus,
}

/// Partial update; absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct GoalPatch {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub status: Option<GoalStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewKpi {
    pub goal_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub unit: Option<String>,
    pub target_value: f64,
    #[serde(default)]
    pub current_value: f64,
}

/// Partial update; absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct KpiPatch {
    pub goal_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub unit: Option<String>,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
}

/// Partial update; absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ProjectPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
}
