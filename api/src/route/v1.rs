use super::{
    access::build_access_routers, auth::build_auth_routers, health::build_health_check_routers,
    report::build_report_routers, space::build_space_routers, student::build_student_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_access_routers())
        .merge(build_report_routers())
        .merge(build_space_routers())
        .merge(build_student_routers());
    Router::new().nest("/api", router)
}
