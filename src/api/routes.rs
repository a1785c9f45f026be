//! API Routes
//!
//! Configures the Axum router for the proxy.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{list_gists_handler, AppState};

/// Creates the main router.
///
/// # Endpoints
/// - `GET /:username` - List a user's gists (`page`, `per_page`/`pageSize` query)
///
/// Every other path, including `/`, is a 404.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/:username", get(list_gists_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
