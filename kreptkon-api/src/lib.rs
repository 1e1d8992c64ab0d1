pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pod;
pub mod repository;
pub mod routes;

pub use config::Config;
pub use error::{Error, Result};

use std::sync::Arc;

use pod::PodInfo;
use repository::UserRepository;

/// Shared application state, constructed once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pod: PodInfo,
    pub users: UserRepository,
}

impl AppState {
    pub fn new(config: Config, pod: PodInfo, users: UserRepository) -> Self {
        Self {
            config: Arc::new(config),
            pod,
            users,
        }
    }
}
