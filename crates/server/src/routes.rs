use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::pal::{PalRepository, PalService, PalServiceConfig};

use crate::openapi::ApiDoc;

pub mod pals;

/// Shared handler state: the roster service behind a type-erased repository.
#[derive(Clone)]
pub struct ServerState {
    pub pals: Arc<PalService<dyn PalRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn PalRepository>, cfg: PalServiceConfig) -> Self {
        Self { pals: Arc::new(PalService::new(repo, cfg)) }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "OK", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, docs and the roster API.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let api = Router::new()
        .route("/api/v1/pals/findAll", get(pals::find_all))
        .route("/api/v1/pals/insertOne", post(pals::insert_one))
        .route("/api/v1/pals/deleteByName", delete(pals::delete_by_name))
        .route("/api/v1/pals/updateByName", put(pals::update_by_name))
        .route("/api/v1/pals/findByName", get(pals::find_by_name))
        .with_state(state);

    public
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx as ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
