// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::docker_repo::DockerRepo;
use crate::usage_service::UsageService;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) usage_service: Arc<UsageService>,
    pub(crate) docker_repo: Arc<DockerRepo>,
}

pub fn app(usage_service: Arc<UsageService>, docker_repo: Arc<DockerRepo>) -> Router {
    let state = AppState {
        usage_service,
        docker_repo,
    };
    Router::new()
        .route("/", get(http::index_handler)) // GET /
        .route("/high-usage", get(http::high_usage_page_handler)) // GET /high-usage
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/data", get(http::api_data_handler)) // GET /api/data?timeframe=current|all
        .route("/api/high-usage", get(http::api_high_usage_handler)) // GET /api/high-usage
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
