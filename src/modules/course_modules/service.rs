use sqlx::PgPool;
use syllabus_core::AppError;
use syllabus_db::PgOrderedStore;
use syllabus_ordering::{
    OrderedItem, OrderedStore, OrderedTransaction, bulk_reorder, detach, prepare_insert, reorder,
};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::{track_content_created, track_content_deleted, track_reorder};
use crate::modules::course_modules::model::{
    BulkReorderDto, CourseModule, CourseModuleWithStats, CreateCourseModuleDto, ReorderDto,
    UpdateCourseModuleDto,
};

const MODULE_WITH_STATS: &str = r#"SELECT
    m.id,
    m.course_id,
    m.title,
    m.description,
    m.position,
    m.created_at,
    m.updated_at,
    COUNT(l.id) AS lesson_count
   FROM course_modules m
   LEFT JOIN lessons l ON l.module_id = m.id"#;

pub struct CourseModuleService;

impl CourseModuleService {
    fn store(db: &PgPool) -> PgOrderedStore<CourseModule> {
        PgOrderedStore::new(db.clone())
    }

    /// Appends the module, or inserts it at `dto.order` and shifts the
    /// modules from there on down by one.
    #[instrument]
    pub async fn create_module(
        db: &PgPool,
        course_id: Uuid,
        dto: CreateCourseModuleDto,
    ) -> Result<CourseModule, AppError> {
        let mut tx = Self::store(db)
            .begin()
            .await
            .map_err(AppError::from_ordering)?;

        let position = prepare_insert(&mut tx, course_id, dto.order)
            .await
            .map_err(AppError::from_ordering)?;

        let module = sqlx::query_as::<_, CourseModule>(
            r#"INSERT INTO course_modules (course_id, title, description, position)
               VALUES ($1, $2, $3, $4)
               RETURNING id, course_id, title, description, position, created_at, updated_at"#,
        )
        .bind(course_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(position)
        .fetch_one(tx.connection())
        .await?;

        tx.commit().await.map_err(AppError::from_ordering)?;

        track_content_created(CourseModule::KIND);

        Ok(module)
    }

    /// Modules of a course in order.
    #[instrument]
    pub async fn get_modules_by_course(
        db: &PgPool,
        course_id: Uuid,
    ) -> Result<Vec<CourseModuleWithStats>, AppError> {
        let course_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(course_id)
                .fetch_one(db)
                .await?;

        if !course_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        let modules = sqlx::query_as::<_, CourseModuleWithStats>(&format!(
            "{MODULE_WITH_STATS} WHERE m.course_id = $1 GROUP BY m.id ORDER BY m.position, m.id"
        ))
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(modules)
    }

    #[instrument]
    pub async fn get_module_by_id(
        db: &PgPool,
        id: Uuid,
    ) -> Result<CourseModuleWithStats, AppError> {
        let module = sqlx::query_as::<_, CourseModuleWithStats>(&format!(
            "{MODULE_WITH_STATS} WHERE m.id = $1 GROUP BY m.id"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Module not found")))?;

        Ok(module)
    }

    /// Updates title and description. The position is never touched here.
    #[instrument]
    pub async fn update_module(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseModuleDto,
    ) -> Result<CourseModule, AppError> {
        let module = sqlx::query_as::<_, CourseModule>(
            r#"UPDATE course_modules
               SET title = COALESCE($2, title),
                   description = COALESCE($3, description),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, course_id, title, description, position, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Module not found")))?;

        Ok(module)
    }

    /// Deletes the module with its lessons and closes the gap it leaves.
    #[instrument]
    pub async fn delete_module(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = Self::store(db)
            .begin()
            .await
            .map_err(AppError::from_ordering)?;

        let module = detach(&mut tx, id)
            .await
            .map_err(AppError::from_ordering)?;

        sqlx::query("DELETE FROM course_modules WHERE id = $1")
            .bind(module.id)
            .execute(tx.connection())
            .await?;

        tx.commit().await.map_err(AppError::from_ordering)?;

        track_content_deleted(CourseModule::KIND);

        Ok(())
    }

    /// Moves the module and returns it as `get_module_by_id` reads it after
    /// the commit.
    #[instrument]
    pub async fn reorder_module(
        db: &PgPool,
        id: Uuid,
        dto: ReorderDto,
    ) -> Result<CourseModuleWithStats, AppError> {
        let result = reorder(&Self::store(db), id, dto.order).await;
        track_reorder(CourseModule::KIND, "single", result.is_ok());

        let module = result.map_err(AppError::from_ordering)?;
        Self::get_module_by_id(db, module.id).await
    }

    /// Applies the submitted orders to the course's modules in one
    /// transaction and returns the full list in its new order.
    #[instrument]
    pub async fn bulk_reorder_modules(
        db: &PgPool,
        course_id: Uuid,
        dto: BulkReorderDto,
    ) -> Result<Vec<CourseModule>, AppError> {
        let result = bulk_reorder(&Self::store(db), course_id, &dto.placements()).await;
        track_reorder(CourseModule::KIND, "bulk", result.is_ok());

        result.map_err(AppError::from_ordering)
    }
}
