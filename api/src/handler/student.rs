use crate::{
    extractor::{AppJson, AppPath, AuthorizedUser},
    model::{
        envelope::ApiResponse,
        student::{StudentResponse, UpdateStudentRequest, UpdateStudentRequestWithId},
    },
};
use axum::{extract::State, Json};
use garde::Validate;
use kernel::model::{id::StudentId, student::event::DeleteStudent};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_student_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<Vec<StudentResponse>>>> {
    user.require_admin()?;

    let students = registry.student_repository().find_all().await?;
    Ok(ApiResponse::data(
        students.into_iter().map(StudentResponse::from).collect(),
    ))
}

pub async fn show_student(
    _user: AuthorizedUser,
    AppPath(student_id): AppPath<StudentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<StudentResponse>>> {
    registry
        .student_repository()
        .find_by_id(student_id)
        .await?
        .map(|student| ApiResponse::data(student.into()))
        .ok_or_else(|| AppError::EntityNotFound(format!("Student not found with id: {student_id}")))
}

pub async fn update_student(
    _user: AuthorizedUser,
    AppPath(student_id): AppPath<StudentId>,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateStudentRequest>,
) -> AppResult<Json<ApiResponse<StudentResponse>>> {
    req.validate(&())?;

    registry
        .student_repository()
        .update(UpdateStudentRequestWithId::new(student_id, req).into())
        .await
        .map(|student| ApiResponse::with_message("Student updated successfully", student.into()))
}

pub async fn delete_student(
    user: AuthorizedUser,
    AppPath(student_id): AppPath<StudentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<()>>> {
    user.require_admin()?;

    registry
        .student_repository()
        .delete(DeleteStudent { student_id })
        .await
        .map(|_| ApiResponse::message("Student deleted successfully"))
}
