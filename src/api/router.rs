//! Local API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Layers (outermost → innermost): CORS → access log → handler.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the local API router with every endpoint under `/api/`.
pub fn local_api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/catalog", get(endpoints::catalog::options))
        .route("/selection", get(endpoints::selection::current))
        .route("/selection/policy", put(endpoints::selection::set_policy))
        .route(
            "/selection/specialty",
            put(endpoints::selection::set_specialty),
        )
        .route("/selection/hover", put(endpoints::selection::set_hover))
        .route(
            "/selection/hospital",
            post(endpoints::selection::select_hospital)
                .delete(endpoints::selection::close_hospital),
        )
        .route("/hospitals", get(endpoints::hospitals::list))
        .route("/map", get(endpoints::map::view))
        .route("/readiness", get(endpoints::readiness::current))
        .route("/theme", get(endpoints::theme::current))
        .route("/theme/toggle", post(endpoints::theme::toggle))
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::audit::log_access));

    // The frontend is served from a different local origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api)
        .layer(cors)
}
