use sqlx::PgPool;
use syllabus_core::AppError;
use syllabus_db::PgOrderedStore;
use syllabus_ordering::{
    OrderedItem, OrderedStore, OrderedTransaction, bulk_reorder, detach, prepare_insert, reorder,
};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::{track_content_created, track_content_deleted, track_reorder};
use crate::modules::lessons::model::{
    BulkReorderDto, CreateLessonDto, Lesson, ReorderDto, UpdateLessonDto,
};

const LESSON_COLUMNS: &str =
    "id, module_id, title, content, duration_minutes, position, created_at, updated_at";

pub struct LessonService;

impl LessonService {
    fn store(db: &PgPool) -> PgOrderedStore<Lesson> {
        PgOrderedStore::new(db.clone())
    }

    /// Appends the lesson, or inserts it at `dto.order` and shifts the
    /// lessons from there on down by one.
    #[instrument]
    pub async fn create_lesson(
        db: &PgPool,
        module_id: Uuid,
        dto: CreateLessonDto,
    ) -> Result<Lesson, AppError> {
        let mut tx = Self::store(db)
            .begin()
            .await
            .map_err(AppError::from_ordering)?;

        let position = prepare_insert(&mut tx, module_id, dto.order)
            .await
            .map_err(AppError::from_ordering)?;

        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            r#"INSERT INTO lessons (module_id, title, content, duration_minutes, position)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {LESSON_COLUMNS}"#
        ))
        .bind(module_id)
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(dto.duration_minutes)
        .bind(position)
        .fetch_one(tx.connection())
        .await?;

        tx.commit().await.map_err(AppError::from_ordering)?;

        track_content_created(Lesson::KIND);

        Ok(lesson)
    }

    /// Lessons of a module in order.
    #[instrument]
    pub async fn get_lessons_by_module(
        db: &PgPool,
        module_id: Uuid,
    ) -> Result<Vec<Lesson>, AppError> {
        let module_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM course_modules WHERE id = $1)",
        )
        .bind(module_id)
        .fetch_one(db)
        .await?;

        if !module_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Module not found")));
        }

        let lessons = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE module_id = $1 ORDER BY position, id"
        ))
        .bind(module_id)
        .fetch_all(db)
        .await?;

        Ok(lessons)
    }

    #[instrument]
    pub async fn get_lesson_by_id(db: &PgPool, id: Uuid) -> Result<Lesson, AppError> {
        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson not found")))?;

        Ok(lesson)
    }

    #[instrument]
    pub async fn update_lesson(
        db: &PgPool,
        id: Uuid,
        dto: UpdateLessonDto,
    ) -> Result<Lesson, AppError> {
        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            r#"UPDATE lessons
               SET title = COALESCE($2, title),
                   content = COALESCE($3, content),
                   duration_minutes = COALESCE($4, duration_minutes),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {LESSON_COLUMNS}"#
        ))
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(dto.duration_minutes)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson not found")))?;

        Ok(lesson)
    }

    /// Deletes the lesson and closes the gap it leaves in its module.
    #[instrument]
    pub async fn delete_lesson(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = Self::store(db)
            .begin()
            .await
            .map_err(AppError::from_ordering)?;

        let lesson = detach(&mut tx, id)
            .await
            .map_err(AppError::from_ordering)?;

        sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(lesson.id)
            .execute(tx.connection())
            .await?;

        tx.commit().await.map_err(AppError::from_ordering)?;

        track_content_deleted(Lesson::KIND);

        Ok(())
    }

    /// Moves the lesson and re-reads it once the move has committed.
    #[instrument]
    pub async fn reorder_lesson(
        db: &PgPool,
        id: Uuid,
        dto: ReorderDto,
    ) -> Result<Lesson, AppError> {
        let result = reorder(&Self::store(db), id, dto.order).await;
        track_reorder(Lesson::KIND, "single", result.is_ok());

        let lesson = result.map_err(AppError::from_ordering)?;
        Self::get_lesson_by_id(db, lesson.id).await
    }

    #[instrument]
    pub async fn bulk_reorder_lessons(
        db: &PgPool,
        module_id: Uuid,
        dto: BulkReorderDto,
    ) -> Result<Vec<Lesson>, AppError> {
        let result = bulk_reorder(&Self::store(db), module_id, &dto.placements()).await;
        track_reorder(Lesson::KIND, "bulk", result.is_ok());

        result.map_err(AppError::from_ordering)
    }
}
