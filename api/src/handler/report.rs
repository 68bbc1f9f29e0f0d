use crate::{
    extractor::{AppPath, AuthorizedUser},
    model::{envelope::ApiResponse, report::OccupancyReportResponse},
};
use axum::{extract::State, Json};
use kernel::model::id::SpaceId;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_occupancy_report_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<Vec<OccupancyReportResponse>>>> {
    let reports = registry.report_repository().occupancy_report_all().await?;

    Ok(ApiResponse::data(
        reports.into_iter().map(OccupancyReportResponse::from).collect(),
    ))
}

pub async fn show_occupancy_report(
    _user: AuthorizedUser,
    AppPath(space_id): AppPath<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<OccupancyReportResponse>>> {
    registry
        .report_repository()
        .occupancy_report(space_id)
        .await
        .map(|report| ApiResponse::data(report.into()))
}
