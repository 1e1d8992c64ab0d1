//! Pod introspection and demo endpoints surrounding the user resource

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::FeatureFlags;
use crate::pod::PodInfo;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: String,
    #[serde(flatten)]
    pub pod: PodInfo,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    #[serde(flatten)]
    pub pod: PodInfo,
}

/// Canned directory entry served by /data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoUser {
    pub id: i32,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct DemoDataResponse {
    pub users: Vec<DemoUser>,
    #[serde(flatten)]
    pub pod: PodInfo,
}

/// Non-secret configuration echo; secrets are reported by presence only
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub environment: String,
    pub log_level: String,
    pub version: String,
    pub features: FeatureFlags,
    pub database_url_set: bool,
    pub secret_key_set: bool,
}

/// Greeting endpoint with pod identity
pub async fn hello(State(state): State<AppState>) -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from kreptkon!".to_string(),
        pod: state.pod.clone(),
    })
}

/// Service status endpoint
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "API is running smoothly".to_string(),
        version: state.config.service.version.clone(),
        environment: state.config.service.environment.clone(),
        pod: state.pod.clone(),
    })
}

pub(crate) fn demo_users() -> Vec<DemoUser> {
    vec![
        DemoUser {
            id: 1,
            name: "Alice".to_string(),
            role: "admin".to_string(),
        },
        DemoUser {
            id: 2,
            name: "Bob".to_string(),
            role: "user".to_string(),
        },
        DemoUser {
            id: 3,
            name: "Charlie".to_string(),
            role: "moderator".to_string(),
        },
    ]
}

/// Canned user directory; only routed when the demo_data feature flag is on
pub async fn demo_data(State(state): State<AppState>) -> Json<DemoDataResponse> {
    Json(DemoDataResponse {
        users: demo_users(),
        pod: state.pod.clone(),
    })
}

/// Configuration echo endpoint
pub async fn config_info(State(state): State<AppState>) -> Json<ConfigResponse> {
    let config = &state.config;
    Json(ConfigResponse {
        environment: config.service.environment.clone(),
        log_level: config.service.log_level.clone(),
        version: config.service.version.clone(),
        features: config.features.clone(),
        database_url_set: !config.database.url.is_empty(),
        secret_key_set: config.secret_key.is_some(),
    })
}
