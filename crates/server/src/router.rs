use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/api/v1/metadata/health",
            get(handlers::metadata_health_handler),
        )
        .route(
            "/api/v1/metadata/generate/{document_id}",
            post(handlers::generate_metadata_handler),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
