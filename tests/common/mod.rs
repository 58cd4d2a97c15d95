#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::{PgPool, Postgres, Transaction};
use syllabus::router::init_router;
use syllabus::state::AppState;
use syllabus_config::CorsConfig;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestCourse {
    pub id: Uuid,
    pub title: String,
}

pub struct TestModule {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
}

pub struct TestLesson {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
}

pub fn setup_test_app(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        cors_config: CorsConfig::default(),
    };
    init_router(state)
}

/// Sends a request through a fresh router and returns the status and the
/// JSON body (`Null` for empty bodies).
pub async fn send(
    pool: &PgPool,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = setup_test_app(pool.clone())
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

pub fn generate_unique_title(prefix: &str) -> String {
    format!("{prefix} {}", Uuid::new_v4())
}

pub async fn create_test_course(tx: &mut Transaction<'_, Postgres>, title: &str) -> TestCourse {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses (title, description) VALUES ($1, $2) RETURNING id",
    )
    .bind(title)
    .bind("Test course")
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestCourse {
        id,
        title: title.to_string(),
    }
}

pub async fn create_test_module(
    tx: &mut Transaction<'_, Postgres>,
    course_id: Uuid,
    title: &str,
    position: i32,
) -> TestModule {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO course_modules (course_id, title, position)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(course_id)
    .bind(title)
    .bind(position)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestModule {
        id,
        course_id,
        title: title.to_string(),
    }
}

pub async fn create_test_lesson(
    tx: &mut Transaction<'_, Postgres>,
    module_id: Uuid,
    title: &str,
    position: i32,
) -> TestLesson {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO lessons (module_id, title, duration_minutes, position)
        VALUES ($1, $2, 30, $3)
        RETURNING id
        "#,
    )
    .bind(module_id)
    .bind(title)
    .bind(position)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestLesson {
        id,
        module_id,
        title: title.to_string(),
    }
}

/// A course holding modules titled after `titles`, at positions 0, 1, 2, ...
pub async fn seed_course(pool: &PgPool, titles: &[&str]) -> (TestCourse, Vec<TestModule>) {
    let mut tx = pool.begin().await.unwrap();
    let course = create_test_course(&mut tx, &generate_unique_title("Course")).await;
    let mut modules = Vec::new();
    for (position, title) in (0..).zip(titles) {
        modules.push(create_test_module(&mut tx, course.id, title, position).await);
    }
    tx.commit().await.unwrap();
    (course, modules)
}

/// A module (inside a fresh course) holding lessons titled after `titles`.
pub async fn seed_module(pool: &PgPool, titles: &[&str]) -> (TestModule, Vec<TestLesson>) {
    let mut tx = pool.begin().await.unwrap();
    let course = create_test_course(&mut tx, &generate_unique_title("Course")).await;
    let module = create_test_module(&mut tx, course.id, "Module", 0).await;
    let mut lessons = Vec::new();
    for (position, title) in (0..).zip(titles) {
        lessons.push(create_test_lesson(&mut tx, module.id, title, position).await);
    }
    tx.commit().await.unwrap();
    (module, lessons)
}

/// Module titles of a course in stored position order, concatenated.
pub async fn module_sequence(pool: &PgPool, course_id: Uuid) -> String {
    sqlx::query_scalar::<_, String>(
        "SELECT title FROM course_modules WHERE course_id = $1 ORDER BY position, id",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
    .unwrap()
    .concat()
}

pub async fn module_positions(pool: &PgPool, course_id: Uuid) -> Vec<i32> {
    sqlx::query_scalar::<_, i32>(
        "SELECT position FROM course_modules WHERE course_id = $1 ORDER BY position",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
    .unwrap()
}

pub async fn lesson_sequence(pool: &PgPool, module_id: Uuid) -> String {
    sqlx::query_scalar::<_, String>(
        "SELECT title FROM lessons WHERE module_id = $1 ORDER BY position, id",
    )
    .bind(module_id)
    .fetch_all(pool)
    .await
    .unwrap()
    .concat()
}

pub async fn lesson_positions(pool: &PgPool, module_id: Uuid) -> Vec<i32> {
    sqlx::query_scalar::<_, i32>(
        "SELECT position FROM lessons WHERE module_id = $1 ORDER BY position",
    )
    .bind(module_id)
    .fetch_all(pool)
    .await
    .unwrap()
}
