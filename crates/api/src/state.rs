use std::sync::Arc;

use survey_core::engine::ValidationEngine;

use crate::config::ServerConfig;

/// Shared application state available to handlers via `State<AppState>`.
///
/// Cheap to clone; everything lives behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Check registry shared by every validation request.
    pub engine: Arc<ValidationEngine>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(ValidationEngine::new()),
        }
    }
}
