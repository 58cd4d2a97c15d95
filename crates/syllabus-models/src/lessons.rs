//! Lesson models and DTOs. Lessons are ordered within their module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use syllabus_ordering::OrderedItem;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lesson {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub duration_minutes: Option<i32>,
    #[sqlx(rename = "position")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderedItem for Lesson {
    type Id = Uuid;
    type ScopeId = Uuid;

    const KIND: &'static str = "Lesson";
    const SCOPE_KIND: &'static str = "Module";

    fn id(&self) -> Uuid {
        self.id
    }

    fn scope_id(&self) -> Uuid {
        self.module_id
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLessonDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub content: Option<String>,
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: Option<i32>,
    /// Position to insert at; appended to the end when omitted
    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

/// Content update. Position changes go through the reorder endpoints.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLessonDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub content: Option<String>,
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: Option<i32>,
}
