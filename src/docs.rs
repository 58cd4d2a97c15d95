use utoipa::OpenApi;

use crate::modules::health::HealthResponse;
use syllabus_core::{ErrorResponse, PaginationMeta, PaginationParams};
use syllabus_models::{
    BulkReorderDto, Course, CourseFilterParams, CourseModule, CourseModuleWithStats,
    CourseWithStats, CreateCourseDto, CreateCourseModuleDto, CreateLessonDto, Lesson,
    PaginatedCoursesResponse, PlacementDto, ReorderDto, UpdateCourseDto, UpdateCourseModuleDto,
    UpdateLessonDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health_check,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::course_modules::controller::create_module,
        crate::modules::course_modules::controller::get_modules_by_course,
        crate::modules::course_modules::controller::bulk_reorder_modules,
        crate::modules::course_modules::controller::get_module,
        crate::modules::course_modules::controller::update_module,
        crate::modules::course_modules::controller::delete_module,
        crate::modules::course_modules::controller::reorder_module,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::get_lessons_by_module,
        crate::modules::lessons::controller::bulk_reorder_lessons,
        crate::modules::lessons::controller::get_lesson,
        crate::modules::lessons::controller::update_lesson,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::lessons::controller::reorder_lesson,
    ),
    components(
        schemas(
            Course,
            CourseWithStats,
            CreateCourseDto,
            UpdateCourseDto,
            CourseFilterParams,
            PaginatedCoursesResponse,
            CourseModule,
            CourseModuleWithStats,
            CreateCourseModuleDto,
            UpdateCourseModuleDto,
            Lesson,
            CreateLessonDto,
            UpdateLessonDto,
            ReorderDto,
            PlacementDto,
            BulkReorderDto,
            PaginationMeta,
            PaginationParams,
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "Courses", description = "Course management"),
        (name = "Modules", description = "Modules of a course and their order"),
        (name = "Lessons", description = "Lessons of a module and their order"),
        (name = "Health", description = "Service liveness")
    ),
    info(
        title = "Syllabus API",
        version = "0.1.0",
        description = "Course content API with ordered modules and lessons, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_reorder_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        assert!(paths.contains(&"/api/modules/{id}/reorder".to_string()));
        assert!(paths.contains(&"/api/lessons/{id}/reorder".to_string()));
        assert!(paths.contains(&"/api/courses/{id}/modules/reorder".to_string()));
        assert!(paths.contains(&"/api/modules/{id}/lessons/reorder".to_string()));
    }
}
