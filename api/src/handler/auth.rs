use crate::{
    extractor::{AppJson, AuthorizedUser},
    model::{
        auth::{AccessTokenResponse, LoginRequest},
        envelope::ApiResponse,
        student::{RegisterStudentRequest, StudentResponse},
    },
};
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::auth::CreateToken;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<RegisterStudentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<StudentResponse>>)> {
    req.validate(&())?;

    let student = registry.student_repository().create(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Student registered successfully", student.into()),
    ))
}

pub async fn login(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AccessTokenResponse>>> {
    req.validate(&())?;

    let user_id = registry
        .auth_repository()
        .verify_user(&req.username, &req.password)
        .await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(user_id))
        .await?;
    let user = registry
        .user_repository()
        .find_current_user(user_id)
        .await?
        .ok_or(AppError::UnauthenticatedError)?;

    tracing::info!(%user_id, username = %user.username, "user logged in");
    Ok(ApiResponse::with_message(
        "Login successful",
        AccessTokenResponse::new(access_token, user),
    ))
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<()>>> {
    registry
        .auth_repository()
        .delete_token(user.access_token)
        .await?;

    Ok(ApiResponse::message("Logout successful"))
}
