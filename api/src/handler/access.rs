use crate::{
    extractor::{AppJson, AppPath, AuthorizedUser},
    model::{
        access::{AccessRecordResponse, EntryRequest, ExitRequest},
        envelope::ApiResponse,
    },
};
use axum::{extract::State, Json};
use garde::Validate;
use kernel::model::{
    access::AccessRecord,
    id::{SpaceId, StudentId},
};
use registry::AppRegistry;
use shared::error::AppResult;

type AccessRecordList = Json<ApiResponse<Vec<AccessRecordResponse>>>;

fn into_list(records: Vec<AccessRecord>) -> AccessRecordList {
    ApiResponse::data(records.into_iter().map(AccessRecordResponse::from).collect())
}

pub async fn register_entry(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<EntryRequest>,
) -> AppResult<Json<ApiResponse<AccessRecordResponse>>> {
    req.validate(&())?;

    tracing::info!(
        student_id = %req.student_id,
        space_id = %req.space_id,
        requested_by = %user.id(),
        "registering entry"
    );
    let record = registry
        .access_record_repository()
        .register_entry(req.into())
        .await?;

    Ok(ApiResponse::with_message(
        "Entry registered successfully",
        record.into(),
    ))
}

pub async fn register_exit(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<ExitRequest>,
) -> AppResult<Json<ApiResponse<AccessRecordResponse>>> {
    req.validate(&())?;

    tracing::info!(
        access_record_id = %req.access_record_id,
        requested_by = %user.id(),
        "registering exit"
    );
    let record = registry
        .access_record_repository()
        .register_exit(req.into())
        .await?;

    Ok(ApiResponse::with_message(
        "Exit registered successfully",
        record.into(),
    ))
}

pub async fn show_access_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<AccessRecordList> {
    user.require_admin()?;

    registry
        .access_record_repository()
        .find_all()
        .await
        .map(into_list)
}

pub async fn show_student_access_list(
    _user: AuthorizedUser,
    AppPath(student_id): AppPath<StudentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<AccessRecordList> {
    registry
        .access_record_repository()
        .find_by_student_id(student_id)
        .await
        .map(into_list)
}

pub async fn show_space_access_list(
    _user: AuthorizedUser,
    AppPath(space_id): AppPath<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<AccessRecordList> {
    registry
        .access_record_repository()
        .find_by_space_id(space_id)
        .await
        .map(into_list)
}

pub async fn show_active_access_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<AccessRecordList> {
    registry
        .access_record_repository()
        .find_active()
        .await
        .map(into_list)
}
