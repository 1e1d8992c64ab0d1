//! Health and readiness probes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::collections::HashMap;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Readiness check response with dependency status
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub service: String,
    pub dependencies: HashMap<String, DependencyStatus>,
}

/// Individual dependency status
#[derive(Debug, Serialize)]
pub struct DependencyStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Simple health check (liveness probe).
///
/// Always returns 200 OK if the service is running; Kubernetes restarts the
/// pod when this stops answering.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.config.service.name.clone(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check with store validation (readiness probe).
///
/// Returns 503 Service Unavailable while the store cannot answer a probe
/// query, so the pod receives no traffic until the database is reachable.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let mut dependencies = HashMap::new();
    let mut all_ready = true;

    match sqlx::query("SELECT 1").fetch_one(state.users.pool()).await {
        Ok(_) => {
            dependencies.insert(
                "database".to_string(),
                DependencyStatus {
                    healthy: true,
                    message: Some("Connected".to_string()),
                },
            );
        }
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            all_ready = false;
            dependencies.insert(
                "database".to_string(),
                DependencyStatus {
                    healthy: false,
                    message: Some(format!("Connection failed: {}", e)),
                },
            );
        }
    }

    let status = if all_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            ready: all_ready,
            service: state.config.service.name.clone(),
            dependencies,
        }),
    )
}
