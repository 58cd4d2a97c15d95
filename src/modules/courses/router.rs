use axum::{
    Router,
    routing::{get, post, put},
};

use crate::modules::course_modules::controller::{
    bulk_reorder_modules, create_module, get_modules_by_course,
};
use crate::state::AppState;

use super::controller::{create_course, delete_course, get_course, get_courses, update_course};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course).get(get_courses))
        .route(
            "/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route(
            "/{id}/modules",
            post(create_module).get(get_modules_by_course),
        )
        .route("/{id}/modules/reorder", put(bulk_reorder_modules))
}
