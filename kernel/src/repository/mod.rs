pub mod access;
pub mod auth;
pub mod health;
pub mod report;
pub mod space;
pub mod student;
pub mod usage;
pub mod user;
