use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::modules::lessons::controller::{
    bulk_reorder_lessons, create_lesson, get_lessons_by_module,
};
use crate::state::AppState;

use super::controller::{delete_module, get_module, reorder_module, update_module};

pub fn init_course_modules_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(get_module).put(update_module).delete(delete_module),
        )
        .route("/{id}/reorder", patch(reorder_module))
        .route(
            "/{id}/lessons",
            post(create_lesson).get(get_lessons_by_module),
        )
        .route("/{id}/lessons/reorder", put(bulk_reorder_lessons))
}
