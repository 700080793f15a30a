//! Hrdesk Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! role/permission matrix shared across all hrdesk components.

pub mod config;
pub mod error;
pub mod models;
pub mod permissions;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use permissions::{Permission, Role};
