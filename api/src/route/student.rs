use axum::{
    routing::{delete, get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::student::{delete_student, show_student, show_student_list, update_student};

pub fn build_student_routers() -> Router<AppRegistry> {
    let students_routers = Router::new()
        .route("/", get(show_student_list))
        .route("/:student_id", get(show_student))
        .route("/:student_id", put(update_student))
        .route("/:student_id", delete(delete_student));

    Router::new().nest("/students", students_routers)
}
