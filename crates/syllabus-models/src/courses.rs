//! Course domain models and DTOs.
//!
//! Courses are the scope of modules; they are not ordered themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use syllabus_core::{PaginationMeta, PaginationParams};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseWithStats {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub module_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseFilterParams {
    /// Case-insensitive substring match on the title
    pub title: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub data: Vec<CourseWithStats>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_dto_validation() {
        let valid = CreateCourseDto {
            title: "Rust for Beginners".to_string(),
            description: Some("Ownership, borrowing and friends".to_string()),
        };
        assert!(valid.validate().is_ok());

        let empty_title = CreateCourseDto {
            title: String::new(),
            description: None,
        };
        assert!(empty_title.validate().is_err());

        let long_title = CreateCourseDto {
            title: "x".repeat(201),
            description: None,
        };
        assert!(long_title.validate().is_err());
    }

    #[test]
    fn test_update_course_dto_allows_partial_updates() {
        let empty = UpdateCourseDto {
            title: None,
            description: None,
        };
        assert!(empty.validate().is_ok());

        let blank_title = UpdateCourseDto {
            title: Some(String::new()),
            description: None,
        };
        assert!(blank_title.validate().is_err());
    }
}
