pub mod email;
pub mod invites;
