pub mod access;
pub mod auth;
pub mod space;
pub mod student;
pub mod user;

use shared::error::AppError;
use std::str::FromStr;

/// Parses a TEXT enum column.
pub(crate) fn parse_column<T: FromStr>(column: &str, value: &str) -> Result<T, AppError> {
    value
        .parse()
        .map_err(|_| AppError::ConversionEntityError(format!("unexpected {column}: {value}")))
}
