use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use syllabus_core::{AppError, ErrorResponse};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::course_modules::model::{
    BulkReorderDto, CourseModule, CourseModuleWithStats, CreateCourseModuleDto, ReorderDto,
    UpdateCourseModuleDto,
};
use crate::modules::course_modules::service::CourseModuleService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/courses/{id}/modules",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = CreateCourseModuleDto,
    responses(
        (status = 201, description = "Module created", body = CourseModule),
        (status = 400, description = "Order out of range or malformed body", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn create_module(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateCourseModuleDto>,
) -> Result<(StatusCode, Json<CourseModule>), AppError> {
    let module = CourseModuleService::create_module(&state.db, course_id, dto).await?;
    Ok((StatusCode::CREATED, Json(module)))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/modules",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Modules of the course in order", body = Vec<CourseModuleWithStats>),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn get_modules_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<CourseModuleWithStats>>, AppError> {
    let modules = CourseModuleService::get_modules_by_course(&state.db, course_id).await?;
    Ok(Json(modules))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}/modules/reorder",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = BulkReorderDto,
    responses(
        (status = 200, description = "Modules of the course in their new order", body = Vec<CourseModule>),
        (status = 400, description = "Module listed twice or from another course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn bulk_reorder_modules(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<BulkReorderDto>,
) -> Result<Json<Vec<CourseModule>>, AppError> {
    let modules = CourseModuleService::bulk_reorder_modules(&state.db, course_id, dto).await?;
    Ok(Json(modules))
}

#[utoipa::path(
    get,
    path = "/api/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Module details", body = CourseModuleWithStats),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn get_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseModuleWithStats>, AppError> {
    let module = CourseModuleService::get_module_by_id(&state.db, id).await?;
    Ok(Json(module))
}

#[utoipa::path(
    put,
    path = "/api/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    request_body = UpdateCourseModuleDto,
    responses(
        (status = 200, description = "Module updated", body = CourseModule),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn update_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseModuleDto>,
) -> Result<Json<CourseModule>, AppError> {
    let module = CourseModuleService::update_module(&state.db, id, dto).await?;
    Ok(Json(module))
}

#[utoipa::path(
    delete,
    path = "/api/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 204, description = "Module deleted, later modules moved up"),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn delete_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    CourseModuleService::delete_module(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/modules/{id}/reorder",
    params(("id" = Uuid, Path, description = "Module ID")),
    request_body = ReorderDto,
    responses(
        (status = 200, description = "Module moved", body = CourseModuleWithStats),
        (status = 400, description = "Order out of range", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 422, description = "Negative order", body = ErrorResponse)
    ),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn reorder_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<ReorderDto>,
) -> Result<Json<CourseModuleWithStats>, AppError> {
    let module = CourseModuleService::reorder_module(&state.db, id, dto).await?;
    Ok(Json(module))
}
