//! Database repositories for the data access layer
//!
//! This crate contains all repository implementations for database
//! operations. Repositories are organized into control/ (organizations,
//! users, invites) and records/ (org-scoped HR domain records). Each
//! repository owns a pool handle and is responsible for a single table.

pub mod db;

pub use db::control::{InviteRepository, OrganizationRepository, UserRepository};
pub use db::records::{
    AttendanceRepository, DriverAuthorizationRepository, GoalRepository, KpiRepository,
    MaintenanceRepository, ProjectRepository, TaskRepository,
};
