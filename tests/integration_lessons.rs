mod common;

use axum::http::StatusCode;
use common::{lesson_positions, lesson_sequence, seed_module, send};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const ABCDE: [&str; 5] = ["A", "B", "C", "D", "E"];

#[sqlx::test(migrations = "./migrations")]
async fn test_move_lesson_to_front(pool: PgPool) {
    let (module, lessons) = seed_module(&pool, &ABCDE).await;

    let (status, body) = send(
        &pool,
        "PATCH",
        &format!("/api/lessons/{}/reorder", lessons[2].id),
        Some(json!({ "order": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"], 0);
    assert_eq!(body["module_id"], module.id.to_string());
    assert_eq!(lesson_sequence(&pool, module.id).await, "CABDE");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_move_lesson_to_end(pool: PgPool) {
    let (module, lessons) = seed_module(&pool, &ABCDE).await;

    let (status, _) = send(
        &pool,
        "PATCH",
        &format!("/api/lessons/{}/reorder", lessons[0].id),
        Some(json!({ "order": 4 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(lesson_sequence(&pool, module.id).await, "BCDEA");
    assert_eq!(lesson_positions(&pool, module.id).await, vec![0, 1, 2, 3, 4]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_reorder_reverses_lessons(pool: PgPool) {
    let (module, lessons) = seed_module(&pool, &ABCDE).await;
    let items: Vec<_> = lessons
        .iter()
        .enumerate()
        .map(|(i, l)| json!({ "id": l.id, "order": 4 - i }))
        .collect();

    let (status, body) = send(
        &pool,
        "PUT",
        &format!("/api/modules/{}/lessons/reorder", module.id),
        Some(json!({ "items": items })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap()[0]["title"], "E");
    assert_eq!(lesson_sequence(&pool, module.id).await, "EDCBA");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_reorder_with_lesson_from_other_module_changes_nothing(pool: PgPool) {
    let (module, lessons) = seed_module(&pool, &ABCDE).await;
    let (other_module, foreign) = seed_module(&pool, &["X"]).await;

    let (status, _) = send(
        &pool,
        "PUT",
        &format!("/api/modules/{}/lessons/reorder", module.id),
        Some(json!({
            "items": [
                { "id": lessons[0].id, "order": 0 },
                { "id": foreign[0].id, "order": 1 }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(lesson_sequence(&pool, module.id).await, "ABCDE");
    assert_eq!(lesson_sequence(&pool, other_module.id).await, "X");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reorder_unknown_lesson_is_not_found(pool: PgPool) {
    let (module, _) = seed_module(&pool, &ABCDE).await;

    let (status, body) = send(
        &pool,
        "PATCH",
        &format!("/api/lessons/{}/reorder", Uuid::new_v4()),
        Some(json!({ "order": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Lesson not found");
    assert_eq!(lesson_sequence(&pool, module.id).await, "ABCDE");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lesson_at_front_shifts_the_rest(pool: PgPool) {
    let (module, _) = seed_module(&pool, &["A", "B"]).await;

    let (status, body) = send(
        &pool,
        "POST",
        &format!("/api/modules/{}/lessons", module.id),
        Some(json!({
            "title": "Z",
            "content": "Welcome",
            "duration_minutes": 15,
            "order": 0
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"], 0);
    assert_eq!(body["duration_minutes"], 15);
    assert_eq!(lesson_sequence(&pool, module.id).await, "ZAB");
    assert_eq!(lesson_positions(&pool, module.id).await, vec![0, 1, 2]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lesson_in_empty_module_starts_at_zero(pool: PgPool) {
    let (module, _) = seed_module(&pool, &[]).await;

    let (status, body) = send(
        &pool,
        "POST",
        &format!("/api/modules/{}/lessons", module.id),
        Some(json!({ "title": "First" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"], 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lesson_with_invalid_duration_is_unprocessable(pool: PgPool) {
    let (module, _) = seed_module(&pool, &[]).await;

    let (status, _) = send(
        &pool,
        "POST",
        &format!("/api/modules/{}/lessons", module.id),
        Some(json!({ "title": "Too short", "duration_minutes": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_lesson_closes_gap(pool: PgPool) {
    let (module, lessons) = seed_module(&pool, &ABCDE).await;

    let (status, _) = send(&pool, "DELETE", &format!("/api/lessons/{}", lessons[0].id), None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(lesson_sequence(&pool, module.id).await, "BCDE");
    assert_eq!(lesson_positions(&pool, module.id).await, vec![0, 1, 2, 3]);

    let (status, _) = send(&pool, "GET", &format!("/api/lessons/{}", lessons[0].id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_lesson_keeps_position(pool: PgPool) {
    let (module, lessons) = seed_module(&pool, &["A", "B"]).await;

    let (status, body) = send(
        &pool,
        "PUT",
        &format!("/api/lessons/{}", lessons[1].id),
        Some(json!({ "content": "Updated", "order": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Updated");
    assert_eq!(body["title"], "B");
    assert_eq!(body["order"], 1);
    assert_eq!(lesson_sequence(&pool, module.id).await, "AB");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_lessons_of_unknown_module_is_not_found(pool: PgPool) {
    let (status, body) = send(
        &pool,
        "GET",
        &format!("/api/modules/{}/lessons", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Module not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reorders_in_different_modules_are_independent(pool: PgPool) {
    let (first, first_lessons) = seed_module(&pool, &["A", "B", "C"]).await;
    let (second, second_lessons) = seed_module(&pool, &["X", "Y", "Z"]).await;

    let first_uri = format!("/api/lessons/{}/reorder", first_lessons[2].id);
    let second_uri = format!("/api/lessons/{}/reorder", second_lessons[0].id);

    let (a, b) = tokio::join!(
        send(&pool, "PATCH", &first_uri, Some(json!({ "order": 0 }))),
        send(&pool, "PATCH", &second_uri, Some(json!({ "order": 2 }))),
    );

    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);
    assert_eq!(lesson_sequence(&pool, first.id).await, "CAB");
    assert_eq!(lesson_sequence(&pool, second.id).await, "YZX");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reorder_returns_lesson_as_stored(pool: PgPool) {
    let (_, lessons) = seed_module(&pool, &["A", "B", "C"]).await;
    let id = lessons[2].id;

    let (status, moved) = send(
        &pool,
        "PATCH",
        &format!("/api/lessons/{id}/reorder"),
        Some(json!({ "order": 0 })),
    )
    .await;
    let (_, fetched) = send(&pool, "GET", &format!("/api/lessons/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["order"], 0);
    assert_eq!(moved, fetched);
}
