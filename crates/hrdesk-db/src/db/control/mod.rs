pub mod invite;
pub mod organization;
pub mod user;

pub use invite::InviteRepository;
pub use organization::OrganizationRepository;
pub use user::UserRepository;
