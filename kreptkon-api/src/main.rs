use anyhow::Context;
use kreptkon_api::{
    database, pod::PodInfo, repository::UserRepository, routes::create_http_router, AppState,
    Config,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting {} on port {}",
        config.service.name,
        config.service.port
    );

    // Connect the store and make sure the users table exists
    let pool = database::create_pool(&config.database).await?;
    let users = UserRepository::new(pool);
    users
        .ensure_schema()
        .await
        .context("failed to initialize the users table")?;

    // Pod identity is resolved once here, never per request
    let pod = PodInfo::detect().await;
    tracing::info!("Pod identity: {} ({})", pod.pod_name, pod.pod_ip);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.service.port));
    let state = AppState::new(config, pod, users);
    let app = create_http_router(state);

    tracing::info!("HTTP server: http://{}", addr);
    tracing::info!("  GET    /users       - List users");
    tracing::info!("  POST   /users       - Create user");
    tracing::info!("  GET    /users/{{id}}  - Get user");
    tracing::info!("  DELETE /users/{{id}}  - Delete user");
    tracing::info!("  GET    /hello, /status, /data, /config");
    tracing::info!("  GET    /health, /ready");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped gracefully");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM, SIGINT, or Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        }
    }
}
