use sqlx::PgPool;
use syllabus_core::{AppError, PaginationMeta};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::{track_content_created, track_content_deleted};
use crate::modules::courses::model::{
    Course, CourseFilterParams, CourseWithStats, CreateCourseDto, PaginatedCoursesResponse,
    UpdateCourseDto,
};

pub struct CourseService;

impl CourseService {
    #[instrument]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"INSERT INTO courses (title, description)
               VALUES ($1, $2)
               RETURNING id, title, description, created_at, updated_at"#,
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_one(db)
        .await?;

        track_content_created("course");

        Ok(course)
    }

    #[instrument]
    pub async fn get_courses(
        db: &PgPool,
        filters: CourseFilterParams,
    ) -> Result<PaginatedCoursesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();
        let title = filters.title.as_ref().map(|t| format!("%{t}%"));

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM courses WHERE ($1::TEXT IS NULL OR title ILIKE $1)",
        )
        .bind(&title)
        .fetch_one(db)
        .await?;

        let courses = sqlx::query_as::<_, CourseWithStats>(
            r#"SELECT
                c.id,
                c.title,
                c.description,
                c.created_at,
                c.updated_at,
                COUNT(m.id) AS module_count
               FROM courses c
               LEFT JOIN course_modules m ON m.course_id = c.id
               WHERE ($1::TEXT IS NULL OR c.title ILIKE $1)
               GROUP BY c.id
               ORDER BY c.created_at DESC, c.id
               LIMIT $2 OFFSET $3"#,
        )
        .bind(&title)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok(PaginatedCoursesResponse {
            data: courses,
            meta: PaginationMeta::new(&filters.pagination, total),
        })
    }

    #[instrument]
    pub async fn get_course_by_id(db: &PgPool, id: Uuid) -> Result<CourseWithStats, AppError> {
        let course = sqlx::query_as::<_, CourseWithStats>(
            r#"SELECT
                c.id,
                c.title,
                c.description,
                c.created_at,
                c.updated_at,
                COUNT(m.id) AS module_count
               FROM courses c
               LEFT JOIN course_modules m ON m.course_id = c.id
               WHERE c.id = $1
               GROUP BY c.id"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        Ok(course)
    }

    #[instrument]
    pub async fn update_course(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"UPDATE courses
               SET title = COALESCE($2, title),
                   description = COALESCE($3, description),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, title, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        Ok(course)
    }

    /// Deletes the course; its modules and their lessons go with it.
    #[instrument]
    pub async fn delete_course(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        track_content_deleted("course");

        Ok(())
    }
}
