//! Course module models and DTOs.
//!
//! Modules are ordered within their course. The position is stored in the
//! `position` column and exposed as `order`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use syllabus_ordering::OrderedItem;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseModule {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "position")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderedItem for CourseModule {
    type Id = Uuid;
    type ScopeId = Uuid;

    const KIND: &'static str = "Module";
    const SCOPE_KIND: &'static str = "Course";

    fn id(&self) -> Uuid {
        self.id
    }

    fn scope_id(&self) -> Uuid {
        self.course_id
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseModuleWithStats {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "position")]
    pub order: i32,
    pub lesson_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseModuleDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Position to insert at; appended to the end when omitted
    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

/// Content update. Position changes go through the reorder endpoints.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseModuleDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}
