use sqlx::PgPool;
use syllabus_config::{CorsConfig, DatabaseConfig};
use syllabus_db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state(database_config: &DatabaseConfig) -> AppState {
    AppState {
        db: init_db_pool(database_config).await,
        cors_config: CorsConfig::from_env(),
    }
}
