//! Module and lesson seeding. Positions are written dense, `0..N` per
//! course and per module.

use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::BoxResult;
use super::models::{LessonSeed, ModuleSeed};

const BATCH_SIZE: usize = 1000;

fn title(words: std::ops::Range<usize>) -> String {
    let sentence: String = Sentence(words).fake();
    sentence.trim_end_matches('.').to_string()
}

pub fn generate_modules(course_ids: &[Uuid], per_course: usize) -> Vec<ModuleSeed> {
    course_ids
        .par_iter()
        .flat_map(|&course_id| {
            (0..per_course)
                .map(|i| ModuleSeed {
                    id: Uuid::new_v4(),
                    course_id,
                    title: format!("{}. {}", i + 1, title(2..5)),
                    description: Some(Sentence(6..12).fake()),
                    position: i as i32,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn generate_lessons(module_ids: &[Uuid], per_module: usize) -> Vec<LessonSeed> {
    module_ids
        .par_iter()
        .flat_map(|&module_id| {
            (0..per_module)
                .map(|i| LessonSeed {
                    module_id,
                    title: title(3..7),
                    content: Some(Paragraph(2..5).fake()),
                    duration_minutes: (5..90).fake(),
                    position: i as i32,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_modules(
    db: &PgPool,
    course_ids: &[Uuid],
    per_course: usize,
) -> BoxResult<Vec<Uuid>> {
    let start_time = Instant::now();
    println!(
        "📦 Seeding {} modules ({per_course} per course)...",
        course_ids.len() * per_course
    );

    let modules = generate_modules(course_ids, per_course);

    let mut tx = db.begin().await?;
    for chunk in modules.chunks(BATCH_SIZE) {
        insert_modules_chunk(&mut tx, chunk).await?;
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} modules in {:?}",
        modules.len(),
        start_time.elapsed()
    );

    Ok(modules.into_iter().map(|m| m.id).collect())
}

pub async fn seed_lessons(db: &PgPool, module_ids: &[Uuid], per_module: usize) -> BoxResult<usize> {
    let start_time = Instant::now();
    println!(
        "📝 Seeding {} lessons ({per_module} per module)...",
        module_ids.len() * per_module
    );

    let lessons = generate_lessons(module_ids, per_module);

    let mut tx = db.begin().await?;
    for chunk in lessons.chunks(BATCH_SIZE) {
        insert_lessons_chunk(&mut tx, chunk).await?;
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} lessons in {:?}",
        lessons.len(),
        start_time.elapsed()
    );

    Ok(lessons.len())
}

fn values_clause(rows: usize, columns: usize) -> String {
    (0..rows)
        .map(|row| {
            let params: Vec<String> = (1..=columns)
                .map(|col| format!("${}", row * columns + col))
                .collect();
            format!("({})", params.join(", "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

async fn insert_modules_chunk(
    tx: &mut Transaction<'_, Postgres>,
    modules: &[ModuleSeed],
) -> BoxResult<()> {
    if modules.is_empty() {
        return Ok(());
    }

    let query = format!(
        "INSERT INTO course_modules (id, course_id, title, description, position) VALUES {}",
        values_clause(modules.len(), 5)
    );

    let mut q = sqlx::query(&query);
    for module in modules {
        q = q
            .bind(module.id)
            .bind(module.course_id)
            .bind(&module.title)
            .bind(&module.description)
            .bind(module.position);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}

async fn insert_lessons_chunk(
    tx: &mut Transaction<'_, Postgres>,
    lessons: &[LessonSeed],
) -> BoxResult<()> {
    if lessons.is_empty() {
        return Ok(());
    }

    let query = format!(
        "INSERT INTO lessons (module_id, title, content, duration_minutes, position) VALUES {}",
        values_clause(lessons.len(), 5)
    );

    let mut q = sqlx::query(&query);
    for lesson in lessons {
        q = q
            .bind(lesson.module_id)
            .bind(&lesson.title)
            .bind(&lesson.content)
            .bind(lesson.duration_minutes)
            .bind(lesson.position);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}
