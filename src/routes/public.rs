use crate::AppState;
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints that carry no role check.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Used by monitoring and load balancers. Returns "ok" while the process is serving.
        .route("/health", get(|| async { "ok" }))
}
