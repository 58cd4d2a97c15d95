use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller::{delete_lesson, get_lesson, reorder_lesson, update_lesson};

pub fn init_lessons_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(get_lesson).put(update_lesson).delete(delete_lesson),
        )
        .route("/{id}/reorder", patch(reorder_lesson))
}
