pub mod attendance;
pub mod auth;
pub mod invites;
pub mod maintenance;
pub mod members;
pub mod organizations;
pub mod planning;
pub mod tasks;
pub mod vehicles;
