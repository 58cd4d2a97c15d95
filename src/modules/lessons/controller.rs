use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use syllabus_core::{AppError, ErrorResponse};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::lessons::model::{
    BulkReorderDto, CreateLessonDto, Lesson, ReorderDto, UpdateLessonDto,
};
use crate::modules::lessons::service::LessonService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/modules/{id}/lessons",
    params(("id" = Uuid, Path, description = "Module ID")),
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = Lesson),
        (status = 400, description = "Order out of range or malformed body", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn create_lesson(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    let lesson = LessonService::create_lesson(&state.db, module_id, dto).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

#[utoipa::path(
    get,
    path = "/api/modules/{id}/lessons",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Lessons of the module in order", body = Vec<Lesson>),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn get_lessons_by_module(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = LessonService::get_lessons_by_module(&state.db, module_id).await?;
    Ok(Json(lessons))
}

#[utoipa::path(
    put,
    path = "/api/modules/{id}/lessons/reorder",
    params(("id" = Uuid, Path, description = "Module ID")),
    request_body = BulkReorderDto,
    responses(
        (status = 200, description = "Lessons of the module in their new order", body = Vec<Lesson>),
        (status = 400, description = "Lesson listed twice or from another module", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn bulk_reorder_lessons(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<BulkReorderDto>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = LessonService::bulk_reorder_lessons(&state.db, module_id, dto).await?;
    Ok(Json(lessons))
}

#[utoipa::path(
    get,
    path = "/api/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson details", body = Lesson),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::get_lesson_by_id(&state.db, id).await?;
    Ok(Json(lesson))
}

#[utoipa::path(
    put,
    path = "/api/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = Lesson),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonDto>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::update_lesson(&state.db, id, dto).await?;
    Ok(Json(lesson))
}

#[utoipa::path(
    delete,
    path = "/api/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 204, description = "Lesson deleted, later lessons moved up"),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    LessonService::delete_lesson(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/lessons/{id}/reorder",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    request_body = ReorderDto,
    responses(
        (status = 200, description = "Lesson moved", body = Lesson),
        (status = 400, description = "Order out of range", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 422, description = "Negative order", body = ErrorResponse)
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn reorder_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<ReorderDto>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::reorder_lesson(&state.db, id, dto).await?;
    Ok(Json(lesson))
}
