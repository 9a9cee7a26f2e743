use axum::{Router, extract::FromRef, http::HeaderName};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod validation;

// Sub-routers grouped by who may call them.
pub mod routes;
use routes::{catalog, public, shopping_lists};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::ApiError;
pub use repository::{InMemoryRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document aggregated from the `#[utoipa::path]` handler annotations and
/// the `ToSchema` models. Served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_list, handlers::delete_list, handlers::invite, handlers::get_list,
        handlers::add_product, handlers::get_catalog, handlers::tag_product,
        handlers::lists_for_user, handlers::remove_product
    ),
    components(
        schemas(
            models::ShoppingList, models::CatalogProduct, models::User,
            models::CreateListRequest, models::DeleteListRequest, models::InviteRequest,
            models::AddProductRequest, models::TagProductRequest, models::RemoveProductRequest,
            models::StatusResponse, models::ListProductsResponse, models::CatalogResponse,
            models::ShoppingListsResponse,
        )
    ),
    tags(
        (name = "shopping-list", description = "Shared Shopping List API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single container shared by every request: the store handle and the
/// loaded configuration. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory store behind the `Repository` trait.
    pub repo: RepositoryState,
    /// Configuration loaded at startup.
    pub config: AppConfig,
}

impl AppState {
    /// State backed by a store with the startup seed data.
    pub fn seeded(config: AppConfig) -> Self {
        Self {
            repo: std::sync::Arc::new(InMemoryRepository::seeded()),
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles every route, applies the observability and CORS layers, and binds
/// the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        // Gated routes: each route carries its own role set (see `routes::gated`).
        .merge(shopping_lists::shopping_list_routes())
        .merge(catalog::catalog_routes())
        .with_state(state);

    // 3. Observability and Correlation Layers
    base_router
        .layer(
            ServiceBuilder::new()
                // Generate an x-request-id for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // One span per request, tagged with the request id.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // Echo the request id back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span used by `TraceLayer`, carrying method, URI and the
/// `x-request-id` so every log line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
