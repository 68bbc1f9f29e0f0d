pub mod config;
pub mod env;
pub mod error;
pub mod observability;
