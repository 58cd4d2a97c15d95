use dotenvy::dotenv;
use syllabus::logging::{init_tracing, shutdown_tracer};
use syllabus::metrics::{init_metrics, metrics_app};
use syllabus::router::init_router;
use syllabus::state::init_app_state;
use syllabus_config::{DatabaseConfig, ServerConfig};
use syllabus_db::run_migrations;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();
    let state = init_app_state(&DatabaseConfig::from_env()).await;

    run_migrations(&state.db)
        .await
        .expect("Failed to run database migrations");

    if let Some(handle) = init_metrics() {
        let metrics_address = server_config.metrics_address();
        tokio::spawn(async move {
            match tokio::net::TcpListener::bind(metrics_address).await {
                Ok(listener) => {
                    info!(%metrics_address, "Metrics server listening");
                    if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                        error!(error = %e, "Metrics server stopped");
                    }
                }
                Err(e) => error!(error = %e, %metrics_address, "Failed to bind metrics server"),
            }
        });
    }

    let app = init_router(state);
    let address = server_config.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .expect("Failed to bind server address");

    info!(%address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");
    info!("Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    shutdown_tracer().await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
