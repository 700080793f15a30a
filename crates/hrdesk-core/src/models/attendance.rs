use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "attendance_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    Scheduled,
    Completed,
    Absent,
}

/// Weekly attendance schedule entry. `weekday` is 0 (Sunday) through 6.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AttendanceSchedule {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub employee_name: String,
    pub weekday: i16,
    pub check_in: NaiveTime,
    pub check_out: NaiveTime,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewAttendanceSchedule {
    #[validate(length(min = 1, max = 200))]
    pub employee_name: String,
    #[validate(range(min = 0, max = 6))]
    pub weekday: i16,
    pub check_in: NaiveTime,
    pub check_out: NaiveTime,
    #[serde(default)]
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

/// Partial update; absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AttendanceSchedulePatch {
    #[validate(length(min = 1, max = 200))]
    pub employee_name: Option<String>,
    #[validate(range(min = 0, max = 6))]
    pub weekday: Option<i16>,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}
