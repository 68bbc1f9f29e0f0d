use crate::model::{id::SpaceId, report::OccupancyReport};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReportRepository: Send + Sync {
    // One report per space, ordered by space code.
    async fn occupancy_report_all(&self) -> AppResult<Vec<OccupancyReport>>;
    async fn occupancy_report(&self, space_id: SpaceId) -> AppResult<OccupancyReport>;
}
