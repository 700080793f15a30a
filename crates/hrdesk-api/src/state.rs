//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only what
//! they need via Axum's `FromRef`, and to avoid a single god object with
//! duplicate repositories. The state is constructed once at startup and
//! injected everywhere; nothing in the crate reaches for a global client.

use crate::auth::jwt::JwtService;
use crate::services::email::EmailService;
use hrdesk_core::Config;
use hrdesk_db::{
    AttendanceRepository, DriverAuthorizationRepository, GoalRepository, InviteRepository,
    KpiRepository, MaintenanceRepository, OrganizationRepository, ProjectRepository,
    TaskRepository, UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Database pool plus the control-plane repositories (organizations, users,
/// invites) used by auth and administration.
#[derive(Clone)]
pub struct ControlState {
    pub pool: PgPool,
    pub organizations: OrganizationRepository,
    pub users: UserRepository,
    pub invites: InviteRepository,
}

/// Org-scoped HR record repositories.
#[derive(Clone)]
pub struct RecordsState {
    pub attendance: AttendanceRepository,
    pub maintenance: MaintenanceRepository,
    pub tasks: TaskRepository,
    pub goals: GoalRepository,
    pub kpis: KpiRepository,
    pub projects: ProjectRepository,
    pub driver_authorizations: DriverAuthorizationRepository,
}

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub control: ControlState,
    pub records: RecordsState,
    pub jwt: JwtService,
    pub email: Option<EmailService>,
    pub config: Config,
    pub is_production: bool,
}

impl axum::extract::FromRef<Arc<AppState>> for ControlState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.control.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for RecordsState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.records.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
