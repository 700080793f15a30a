//! Application setup and initialization.

pub mod database;
pub mod routes;
pub mod server;

use crate::auth::jwt::JwtService;
use crate::auth::password::hash_password;
use crate::services::email::EmailService;
use crate::state::{AppState, ControlState, RecordsState};
use anyhow::{Context, Result};
use hrdesk_core::Config;
use hrdesk_db::{
    AttendanceRepository, DriverAuthorizationRepository, GoalRepository, InviteRepository,
    KpiRepository, MaintenanceRepository, OrganizationRepository, ProjectRepository,
    TaskRepository, UserRepository,
};
use std::sync::Arc;

/// Initialize the entire application.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration before touching the network.
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry();

    tracing::info!(
        environment = config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;

    let control = ControlState {
        pool: pool.clone(),
        organizations: OrganizationRepository::new(pool.clone()),
        users: UserRepository::new(pool.clone()),
        invites: InviteRepository::new(pool.clone()),
    };

    let records = RecordsState {
        attendance: AttendanceRepository::new(pool.clone()),
        maintenance: MaintenanceRepository::new(pool.clone()),
        tasks: TaskRepository::new(pool.clone()),
        goals: GoalRepository::new(pool.clone()),
        kpis: KpiRepository::new(pool.clone()),
        projects: ProjectRepository::new(pool.clone()),
        driver_authorizations: DriverAuthorizationRepository::new(pool),
    };

    bootstrap_super_admin(&config, &control.users).await?;

    let jwt = JwtService::new(config.jwt_secret(), config.jwt_expiry_hours());
    let email = EmailService::from_config(&config);

    let state = Arc::new(AppState {
        control,
        records,
        jwt,
        email,
        is_production: config.is_production(),
        config: config.clone(),
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

/// Ensure the platform super admin account exists. Idempotent across restarts.
async fn bootstrap_super_admin(config: &Config, users: &UserRepository) -> Result<()> {
    let password_hash = hash_password(config.super_admin_password())
        .map_err(|e| anyhow::anyhow!("Failed to hash super admin password: {}", e))?;

    let admin = users
        .ensure_super_admin(config.super_admin_email(), &password_hash)
        .await
        .context("Failed to bootstrap super admin account")?;

    tracing::info!(user_id = %admin.id, "Super admin account ready");
    Ok(())
}
