//! Fake course content for development databases.
//!
//! Rows are generated in parallel with Rayon and inserted with multi-value
//! `INSERT` statements inside one transaction per table.

pub mod content;
pub mod courses;
pub mod models;

use sqlx::PgPool;
use std::time::Instant;

pub use models::SeedConfig;

pub type BoxResult<T> = Result<T, Box<dyn std::error::Error>>;

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> BoxResult<()> {
    let start_time = Instant::now();
    println!(
        "🌱 Seeding {} courses, {} modules, {} lessons\n",
        config.courses,
        config.total_modules(),
        config.total_lessons()
    );

    let course_ids = courses::seed_courses(db, config.courses).await?;
    let module_ids = content::seed_modules(db, &course_ids, config.modules_per_course).await?;
    content::seed_lessons(db, &module_ids, config.lessons_per_module).await?;

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    Ok(())
}

/// Deletes every course; modules and lessons cascade.
pub async fn clear_all(db: &PgPool) -> BoxResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing courses...");

    let deleted = sqlx::query("DELETE FROM courses")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {deleted} courses with their modules and lessons in {:?}",
        start_time.elapsed()
    );
    Ok(deleted)
}
