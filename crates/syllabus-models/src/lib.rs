//! # Syllabus Models
//!
//! Domain models and DTOs for the Syllabus API: database rows, request
//! bodies with validation rules, and response shapes.
//!
//! - [`courses`]: courses, the scope of modules
//! - [`course_modules`]: modules, ordered within a course
//! - [`lessons`]: lessons, ordered within a module
//! - [`ordering`]: reorder and bulk reorder request bodies
//!
//! [`CourseModule`] and [`Lesson`] implement
//! [`syllabus_ordering::OrderedItem`], which is what lets the ordering
//! operations work on both.

pub mod course_modules;
pub mod courses;
pub mod lessons;
pub mod ordering;

pub use course_modules::{
    CourseModule, CourseModuleWithStats, CreateCourseModuleDto, UpdateCourseModuleDto,
};
pub use courses::{
    Course, CourseFilterParams, CourseWithStats, CreateCourseDto, PaginatedCoursesResponse,
    UpdateCourseDto,
};
pub use lessons::{CreateLessonDto, Lesson, UpdateLessonDto};
pub use ordering::{BulkReorderDto, PlacementDto, ReorderDto};
