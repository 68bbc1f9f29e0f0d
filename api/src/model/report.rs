use kernel::model::{id::SpaceId, report::OccupancyReport};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReportResponse {
    pub space_id: SpaceId,
    pub space_name: String,
    pub space_code: String,
    pub capacity: i32,
    pub current_occupancy: i64,
    pub occupancy_rate: f64,
    pub total_accesses_today: i64,
    pub total_accesses_this_week: i64,
    pub total_accesses_this_month: i64,
    pub average_duration_in_minutes: f64,
}

impl From<OccupancyReport> for OccupancyReportResponse {
    fn from(value: OccupancyReport) -> Self {
        let OccupancyReport {
            space_id,
            space_name,
            space_code,
            capacity,
            current_occupancy,
            occupancy_rate,
            total_accesses_today,
            total_accesses_this_week,
            total_accesses_this_month,
            average_duration_in_minutes,
        } = value;
        Self {
            space_id,
            space_name,
            space_code,
            capacity,
            current_occupancy,
            occupancy_rate,
            total_accesses_today,
            total_accesses_this_week,
            total_accesses_this_month,
            average_duration_in_minutes,
        }
    }
}
