//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod attendance;
mod invite;
mod maintenance;
mod organization;
mod planning;
mod task;
mod user;
mod vehicle;

// Re-export all models for convenient imports
pub use attendance::*;
pub use invite::*;
pub use maintenance::*;
pub use organization::*;
pub use planning::*;
pub use task::*;
pub use user::*;
pub use vehicle::*;
