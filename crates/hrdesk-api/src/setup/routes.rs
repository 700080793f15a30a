//! Route configuration and setup.

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use hrdesk_core::Config;
use std::sync::Arc;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

const MAX_BODY_BYTES: usize = 1024 * 1024;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Setup all application routes.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let auth_state = Arc::new(AuthState {
        jwt: state.jwt.clone(),
        users: state.control.users.clone(),
        organizations: state.control.organizations.clone(),
    });

    let protected = protected_routes(state.clone()).layer(axum::middleware::from_fn_with_state(
        auth_state,
        auth_middleware,
    ));

    let app = public_routes(state.clone())
        .merge(protected)
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration.
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins()
            .iter()
            .map(|o| o.parse())
            .collect::<Result<_, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    };
    Ok(cors)
}

/// Public routes (no authentication required).
fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/live", get(liveness_check))
        .route("/ready", get(readiness_check))
        .route(
            &format!("{API_PREFIX}/auth/login"),
            post(handlers::auth::login),
        )
        .route(
            &format!("{API_PREFIX}/invites/accept"),
            post(handlers::invites::accept_invite),
        )
        .with_state(state)
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::ApiDoc::openapi()) }),
        )
}

/// Protected routes (require authentication).
fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{API_PREFIX}/auth/me"), get(handlers::auth::me))
        .merge(organization_routes())
        .merge(member_routes())
        .merge(invite_routes())
        .merge(record_routes())
        .with_state(state)
}

/// Organization lifecycle routes (super admin).
fn organization_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{API_PREFIX}/organizations"),
            post(handlers::organizations::create_organization)
                .get(handlers::organizations::list_organizations),
        )
        .route(
            &format!("{API_PREFIX}/organizations/{{id}}"),
            get(handlers::organizations::get_organization)
                .delete(handlers::organizations::delete_organization),
        )
        .route(
            &format!("{API_PREFIX}/organizations/{{id}}/status"),
            put(handlers::organizations::set_organization_status),
        )
}

/// Member management routes.
fn member_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{API_PREFIX}/members"),
            get(handlers::members::list_members),
        )
        .route(
            &format!("{API_PREFIX}/members/{{id}}"),
            axum::routing::delete(handlers::members::remove_member),
        )
        .route(
            &format!("{API_PREFIX}/members/{{id}}/role"),
            put(handlers::members::set_member_role),
        )
        .route(
            &format!("{API_PREFIX}/members/{{id}}/status"),
            put(handlers::members::set_member_status),
        )
}

/// Invite lifecycle routes (issue, list, revoke).
fn invite_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{API_PREFIX}/invites"),
            post(handlers::invites::create_invite).get(handlers::invites::list_invites),
        )
        .route(
            &format!("{API_PREFIX}/invites/{{id}}"),
            axum::routing::delete(handlers::invites::revoke_invite),
        )
}

/// Org-scoped HR record routes.
fn record_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{API_PREFIX}/attendance"),
            post(handlers::attendance::create_schedule).get(handlers::attendance::list_schedules),
        )
        .route(
            &format!("{API_PREFIX}/attendance/{{id}}"),
            get(handlers::attendance::get_schedule)
                .put(handlers::attendance::update_schedule)
                .delete(handlers::attendance::delete_schedule),
        )
        .route(
            &format!("{API_PREFIX}/maintenance"),
            post(handlers::maintenance::create_request).get(handlers::maintenance::list_requests),
        )
        .route(
            &format!("{API_PREFIX}/maintenance/{{id}}"),
            get(handlers::maintenance::get_request)
                .put(handlers::maintenance::update_request)
                .delete(handlers::maintenance::delete_request),
        )
        .route(
            &format!("{API_PREFIX}/tasks"),
            post(handlers::tasks::create_task).get(handlers::tasks::list_tasks),
        )
        .route(
            &format!("{API_PREFIX}/tasks/{{id}}"),
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route(
            &format!("{API_PREFIX}/goals"),
            post(handlers::planning::create_goal).get(handlers::planning::list_goals),
        )
        .route(
            &format!("{API_PREFIX}/goals/{{id}}"),
            get(handlers::planning::get_goal)
                .put(handlers::planning::update_goal)
                .delete(handlers::planning::delete_goal),
        )
        .route(
            &format!("{API_PREFIX}/kpis"),
            post(handlers::planning::create_kpi).get(handlers::planning::list_kpis),
        )
        .route(
            &format!("{API_PREFIX}/kpis/{{id}}"),
            get(handlers::planning::get_kpi)
                .put(handlers::planning::update_kpi)
                .delete(handlers::planning::delete_kpi),
        )
        .route(
            &format!("{API_PREFIX}/projects"),
            post(handlers::planning::create_project).get(handlers::planning::list_projects),
        )
        .route(
            &format!("{API_PREFIX}/projects/{{id}}"),
            get(handlers::planning::get_project)
                .put(handlers::planning::update_project)
                .delete(handlers::planning::delete_project),
        )
        .route(
            &format!("{API_PREFIX}/driver-authorizations"),
            post(handlers::vehicles::create_authorization)
                .get(handlers::vehicles::list_authorizations),
        )
        .route(
            &format!("{API_PREFIX}/driver-authorizations/{{id}}"),
            get(handlers::vehicles::get_authorization)
                .put(handlers::vehicles::update_authorization)
                .delete(handlers::vehicles::delete_authorization),
        )
}

/// Liveness probe: the process can respond.
async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "alive" })))
}

/// Readiness probe: the service can reach its critical dependencies.
async fn readiness_check(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let mut response = serde_json::json!({
        "status": "ready",
        "database": "unknown"
    });

    let mut overall_ready = true;

    match tokio::time::timeout(TIMEOUT, sqlx::query("SELECT 1").execute(&state.control.pool)).await
    {
        Ok(Ok(_)) => {
            response["database"] = serde_json::json!("ready");
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Database readiness check failed");
            response["database"] = serde_json::json!(format!("not_ready: {}", e));
            overall_ready = false;
        }
        Err(_) => {
            tracing::error!("Database readiness check timed out");
            response["database"] = serde_json::json!("timeout");
            overall_ready = false;
        }
    }

    let status_code = if overall_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let mut response = serde_json::json!({
        "status": "healthy",
        "database": "unknown"
    });

    let mut overall_healthy = true;

    match tokio::time::timeout(TIMEOUT, sqlx::query("SELECT 1").execute(&state.control.pool)).await
    {
        Ok(Ok(_)) => {
            response["database"] = serde_json::json!("healthy");
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Database health check failed");
            response["database"] = serde_json::json!(format!("unhealthy: {}", e));
            overall_healthy = false;
        }
        Err(_) => {
            tracing::error!("Database health check timed out");
            response["database"] = serde_json::json!("timeout");
            overall_healthy = false;
        }
    }

    let status_code = if overall_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
