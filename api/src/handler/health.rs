use crate::model::envelope::ApiResponse;
use axum::{extract::State, http::StatusCode, Json};
use registry::AppRegistry;

pub async fn health_check() -> Json<ApiResponse<()>> {
    ApiResponse::message("OK")
}

pub async fn health_check_db(
    State(registry): State<AppRegistry>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    if registry.health_check_repository().check_db().await {
        (StatusCode::OK, ApiResponse::message("OK"))
    } else {
        tracing::warn!("database health check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse {
                success: false,
                message: Some("database unreachable".into()),
                data: None,
            }),
        )
    }
}
