pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe Scaler API",
        version = "1.0.0",
        description = "Store recipes and rescale their ingredient quantities to any serving count"
    ),
    tags(
        (name = "Recipes", description = "Recipe storage and scaling"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes())
        .split_for_parts();

    let cors = cors_layer(&state.config.server.cors);
    let static_dir = state.config.server.static_dir.clone();

    let mut router = router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api));

    if let Some(dir) = static_dir {
        tracing::info!(dir = %dir.display(), "Serving static client files");
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(cors).layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allow_origin = if config.allow_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::with_capacity(config.allow_origins.len());
        for origin in &config.allow_origins {
            match HeaderValue::from_str(origin) {
                Ok(value) => origins.push(value),
                Err(_) => tracing::warn!(%origin, "Ignoring invalid CORS origin"),
            }
        }
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age))
}
