use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BusinessRuleViolation(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("transaction could not be executed")]
    TransactionError(#[source] sqlx::Error),
    #[error("an error occurred while running a database operation")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("{}", .0.body_text())]
    JsonRejection(#[from] JsonRejection),
    #[error("{}", .0.body_text())]
    PathRejection(#[from] PathRejection),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("invalid username or password")]
    UnauthenticatedError,
    #[error("missing or invalid access token")]
    UnauthorizedError,
    #[error("operation not permitted")]
    ForbiddenOperation,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BusinessRuleViolation(_)
            | AppError::ValidationError(_)
            | AppError::ConvertToUuidError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonRejection(rejection) => rejection.status(),
            AppError::PathRejection(rejection) => rejection.status(),
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            e @ (AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)
            | AppError::ConversionEntityError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let message = if status_code.is_server_error() {
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        let body = serde_json::json!({
            "success": false,
            "message": message,
        });
        (status_code, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::BusinessRuleViolation("Space has reached maximum capacity".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::EntityNotFound("Space not found".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::ForbiddenOperation, StatusCode::FORBIDDEN)]
    #[case(AppError::UnauthorizedError, StatusCode::UNAUTHORIZED)]
    #[case(AppError::NoRowsAffectedError("spaces".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_errors_to_status(#[case] error: AppError, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[tokio::test]
    async fn error_body_is_a_failed_envelope() {
        let res = AppError::BusinessRuleViolation("Access record is not active".into())
            .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Access record is not active");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let res = AppError::ConversionEntityError("bad status column".into()).into_response();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "internal server error");
    }
}
