//! # Syllabus Config
//!
//! Configuration types for the Syllabus API, loaded from environment
//! variables (a `.env` file is read by the binaries through `dotenvy`).
//!
//! - [`cors`]: allowed browser origins
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: API and metrics listener addresses
//!
//! # Example
//!
//! ```ignore
//! use syllabus_config::{CorsConfig, DatabaseConfig, ServerConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let database_config = DatabaseConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;
