//! OpenAPI documentation, served at /api/openapi.json and browsable at /docs.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRDesk API",
        description = "Multi-tenant HR administration: attendance, maintenance, \
                       tasks, planning, and driver authorizations."
    ),
    paths(
        crate::handlers::auth::login,
        crate::handlers::auth::me,
        crate::handlers::organizations::list_organizations,
        crate::handlers::organizations::create_organization,
        crate::handlers::organizations::get_organization,
        crate::handlers::organizations::set_organization_status,
        crate::handlers::organizations::delete_organization,
        crate::handlers::members::list_members,
        crate::handlers::members::set_member_role,
        crate::handlers::members::set_member_status,
        crate::handlers::members::remove_member,
        crate::handlers::invites::create_invite,
        crate::handlers::invites::list_invites,
        crate::handlers::invites::revoke_invite,
        crate::handlers::invites::accept_invite,
        crate::handlers::attendance::list_schedules,
        crate::handlers::attendance::get_schedule,
        crate::handlers::attendance::create_schedule,
        crate::handlers::attendance::update_schedule,
        crate::handlers::attendance::delete_schedule,
        crate::handlers::maintenance::list_requests,
        crate::handlers::maintenance::get_request,
        crate::handlers::maintenance::create_request,
        crate::handlers::maintenance::update_request,
        crate::handlers::maintenance::delete_request,
        crate::handlers::tasks::list_tasks,
        crate::handlers::tasks::get_task,
        crate::handlers::tasks::create_task,
        crate::handlers::tasks::update_task,
        crate::handlers::tasks::delete_task,
        crate::handlers::planning::list_goals,
        crate::handlers::planning::get_goal,
        crate::handlers::planning::create_goal,
        crate::handlers::planning::update_goal,
        crate::handlers::planning::delete_goal,
        crate::handlers::planning::list_kpis,
        crate::handlers::planning::get_kpi,
        crate::handlers::planning::create_kpi,
        crate::handlers::planning::update_kpi,
        crate::handlers::planning::delete_kpi,
        crate::handlers::planning::list_projects,
        crate::handlers::planning::get_project,
        crate::handlers::planning::create_project,
        crate::handlers::planning::update_project,
        crate::handlers::planning::delete_project,
        crate::handlers::vehicles::list_authorizations,
        crate::handlers::vehicles::get_authorization,
        crate::handlers::vehicles::create_authorization,
        crate::handlers::vehicles::update_authorization,
        crate::handlers::vehicles::delete_authorization,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        crate::handlers::auth::LoginRequest,
        crate::handlers::auth::LoginResponse,
        crate::handlers::organizations::CreateOrganizationRequest,
        crate::handlers::organizations::CreateOrganizationResponse,
        crate::handlers::organizations::OrganizationDetailResponse,
        crate::handlers::organizations::UpdateOrganizationStatusRequest,
        crate::handlers::members::UpdateMemberRoleRequest,
        crate::handlers::members::UpdateMemberStatusRequest,
        crate::handlers::invites::CreateInviteRequest,
        crate::handlers::invites::CreateInviteResponse,
        crate::handlers::invites::AcceptInviteRequest,
        crate::handlers::invites::AcceptInviteResponse,
        hrdesk_core::permissions::Role,
        hrdesk_core::models::Organization,
        hrdesk_core::models::OrganizationStatus,
        hrdesk_core::models::OrganizationWithCount,
        hrdesk_core::models::UserResponse,
        hrdesk_core::models::InviteResponse,
        hrdesk_core::models::AttendanceSchedule,
        hrdesk_core::models::AttendanceStatus,
        hrdesk_core::models::NewAttendanceSchedule,
        hrdesk_core::models::AttendanceSchedulePatch,
        hrdesk_core::models::MaintenanceRequest,
        hrdesk_core::models::MaintenanceStatus,
        hrdesk_core::models::MaintenancePriority,
        hrdesk_core::models::NewMaintenanceRequest,
        hrdesk_core::models::MaintenanceRequestPatch,
        hrdesk_core::models::Task,
        hrdesk_core::models::TaskStatus,
        hrdesk_core::models::NewTask,
        hrdesk_core::models::TaskPatch,
        hrdesk_core::models::Goal,
        hrdesk_core::models::GoalStatus,
        hrdesk_core::models::NewGoal,
        hrdesk_core::models::GoalPatch,
        hrdesk_core::models::Kpi,
        hrdesk_core::models::NewKpi,
        hrdesk_core::models::KpiPatch,
        hrdesk_core::models::Project,
        hrdesk_core::models::ProjectStatus,
        hrdesk_core::models::NewProject,
        hrdesk_core::models::ProjectPatch,
        hrdesk_core::models::DriverAuthorization,
        hrdesk_core::models::AuthorizationStatus,
        hrdesk_core::models::NewDriverAuthorization,
        hrdesk_core::models::DriverAuthorizationPatch,
    )),
    tags(
        (name = "auth", description = "Authentication"),
        (name = "organizations", description = "Organization lifecycle (super admin)"),
        (name = "members", description = "Member management"),
        (name = "invites", description = "Invite lifecycle"),
        (name = "attendance", description = "Weekly attendance schedules"),
        (name = "maintenance", description = "Maintenance requests"),
        (name = "tasks", description = "Task board"),
        (name = "planning", description = "Goals, KPIs, and projects"),
        (name = "vehicles", description = "Driver authorizations"),
    )
)]
pub struct ApiDoc;
