use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::report::{show_occupancy_report, show_occupancy_report_list};

pub fn build_report_routers() -> Router<AppRegistry> {
    let report_routers = Router::new()
        .route("/occupancy", get(show_occupancy_report_list))
        .route("/occupancy/space/:space_id", get(show_occupancy_report));

    Router::new().nest("/reports", report_routers)
}
