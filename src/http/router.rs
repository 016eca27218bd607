//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing) and returns
//! an axum router ready for serving.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Schedule management
        .route("/schedules", post(handlers::create_schedule))
        .route("/schedules", get(handlers::list_schedules))
        .route("/schedules/{id}", get(handlers::get_schedule))
        .route("/schedules/{id}", put(handlers::update_schedule))
        .route("/schedules/{id}/deactivate", post(handlers::deactivate_schedule))
        // Teaching activities
        .route("/activities/generate", post(handlers::generate_activities))
        .route("/activities/pending", get(handlers::pending_activities))
        .route("/activities/{id}/complete", post(handlers::complete_activity));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::db::repositories::LocalRepository;
    use crate::directory::StaticDirectory;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new())
            as Arc<dyn crate::db::repository::FullRepository>;
        let directory =
            Arc::new(StaticDirectory::new()) as Arc<dyn crate::directory::ResourceDirectory>;
        let state = AppState::new(repo, directory);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
