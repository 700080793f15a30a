// Control repositories (organizations, users, invites)
pub mod control;

// Domain record repositories (attendance, maintenance, tasks, planning, vehicles)
pub mod records;
