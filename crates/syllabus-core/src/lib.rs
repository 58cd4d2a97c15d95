//! # Syllabus Core
//!
//! Core types, errors, and utilities for the Syllabus API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Pagination utilities for list endpoints
//!
//! # Example
//!
//! ```ignore
//! use syllabus_core::errors::AppError;
//! use syllabus_core::pagination::{PaginationMeta, PaginationParams};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//!
//! let params = PaginationParams::default();
//! let meta = PaginationMeta::new(&params, 42);
//! ```

pub mod errors;
pub mod pagination;

pub use errors::{AppError, ErrorResponse};
pub use pagination::{PaginationMeta, PaginationParams};
