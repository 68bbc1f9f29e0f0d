use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::access::{
    register_entry, register_exit, show_access_list, show_active_access_list,
    show_space_access_list, show_student_access_list,
};

pub fn build_access_routers() -> Router<AppRegistry> {
    let access_routers = Router::new()
        .route("/", get(show_access_list))
        .route("/entry", post(register_entry))
        .route("/exit", post(register_exit))
        .route("/active", get(show_active_access_list))
        .route("/student/:student_id", get(show_student_access_list))
        .route("/space/:space_id", get(show_space_access_list));

    Router::new().nest("/access", access_routers)
}
