//! # Syllabus CLI
//!
//! Database seeding and ordering maintenance for Syllabus development.
//!
//! ## Usage
//!
//! ```ignore
//! use syllabus_cli::seeder::{SeedConfig, seed_all};
//! use syllabus_cli::maintenance::check_ordering;
//!
//! seed_all(&pool, SeedConfig::new(10)).await?;
//! let report = check_ordering(&pool).await?;
//! ```

pub mod maintenance;
pub mod seeder;
