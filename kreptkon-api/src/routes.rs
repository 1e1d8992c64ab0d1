//! HTTP router assembly

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::{handlers, AppState};

/// Build the HTTP router with all routes and middleware
pub fn create_http_router(state: AppState) -> Router {
    let timeout = state.config.timeout();
    let demo_data_enabled = state.config.features.demo_data;

    let mut router = Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user).delete(handlers::delete_user),
        )
        .route("/hello", get(handlers::hello))
        .route("/status", get(handlers::status))
        .route("/config", get(handlers::config_info))
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::readiness));

    if demo_data_enabled {
        router = router.route("/data", get(handlers::demo_data));
    }

    router.with_state(state).layer(
        ServiceBuilder::new()
            // Outer layers (executed first on request, last on response)
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(timeout))
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive()),
    )
}
