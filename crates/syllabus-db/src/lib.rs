//! # Syllabus DB
//!
//! Database pool, migrations and the PostgreSQL backend for the ordering
//! operations.
//!
//! # Example
//!
//! ```ignore
//! use syllabus_config::DatabaseConfig;
//! use syllabus_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()).await;
//!     run_migrations(&pool).await.expect("Failed to run migrations");
//! }
//! ```

pub mod ordered;

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use syllabus_config::DatabaseConfig;

pub use ordered::{OrderedTable, PgOrderedStore, PgOrderedTransaction, find_non_dense_scopes};
pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and is shared through the
/// application state.
///
/// # Panics
///
/// Panics if the connection to the database fails.
pub async fn init_db_pool(config: &DatabaseConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .expect("Failed to connect to database")
}

/// Applies the migrations embedded from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    tracing::info!("Running database migrations");
    sqlx::migrate!("../../migrations").run(pool).await
}
