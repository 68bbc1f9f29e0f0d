pub mod access;
pub mod auth;
pub mod id;
pub mod occupancy;
pub mod report;
pub mod role;
pub mod space;
pub mod student;
pub mod usage;
pub mod user;
