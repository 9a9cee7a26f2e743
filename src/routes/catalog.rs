use super::gated;
use crate::{AppState, auth, handlers};
use axum::{Router, routing::get};

/// Catalog Router Module
///
/// Read-only access to the reference product catalog. Open to every known role.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        // GET /products/get
        .route(
            "/products/get",
            gated(get(handlers::get_catalog), auth::CATALOG_READERS),
        )
}
