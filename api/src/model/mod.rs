pub mod access;
pub mod auth;
pub mod envelope;
pub mod report;
pub mod space;
pub mod student;
