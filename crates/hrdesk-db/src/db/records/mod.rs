pub mod attendance;
pub mod maintenance;
pub mod planning;
pub mod task;
pub mod vehicle;

pub use attendance::AttendanceRepository;
pub use maintenance::MaintenanceRepository;
pub use planning::{GoalRepository, KpiRepository, ProjectRepository};
pub use task::TaskRepository;
pub use vehicle::DriverAuthorizationRepository;
