//! Course seeding.

use fake::Fake;
use fake::faker::company::en::{Buzzword, CatchPhrase};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::BoxResult;
use super::models::CourseSeed;

const BATCH_SIZE: usize = 500;

/// Generates course data in parallel using Rayon
pub fn generate_courses(count: usize) -> Vec<CourseSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let topic: String = Buzzword().fake();
            let description: String = CatchPhrase().fake();

            CourseSeed {
                id: Uuid::new_v4(),
                title: format!("{} {}", capitalize(&topic), i + 1),
                description: Some(description),
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub async fn seed_courses(db: &PgPool, count: usize) -> BoxResult<Vec<Uuid>> {
    let start_time = Instant::now();
    println!("📚 Seeding {count} courses...");

    let courses = generate_courses(count);

    let mut tx = db.begin().await?;
    for chunk in courses.chunks(BATCH_SIZE) {
        insert_courses_chunk(&mut tx, chunk).await?;
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} courses in {:?}",
        courses.len(),
        start_time.elapsed()
    );

    Ok(courses.into_iter().map(|c| c.id).collect())
}

async fn insert_courses_chunk(
    tx: &mut Transaction<'_, Postgres>,
    courses: &[CourseSeed],
) -> BoxResult<()> {
    if courses.is_empty() {
        return Ok(());
    }

    let mut query = String::from("INSERT INTO courses (id, title, description) VALUES ");
    for i in 0..courses.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 3;
        query.push_str(&format!("(${}, ${}, ${})", p + 1, p + 2, p + 3));
    }

    let mut q = sqlx::query(&query);
    for course in courses {
        q = q.bind(course.id).bind(&course.title).bind(&course.description);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}
