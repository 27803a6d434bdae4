use crate::{config::Config, middleware::cors::cors_layer, services::Services};
use axum::{
    handler::HandlerWithoutStateExt, http::StatusCode, middleware, Extension, Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

mod ranking;

/// Creates the application router with the ranking API and the
/// static file fallback
///
/// `services` The services shared with the routes
/// `config`   The server config
pub fn router(services: Arc<Services>, config: &Config) -> Router {
    let mut api_router = ranking::router();

    if config.cors {
        api_router = api_router.layer(middleware::from_fn(cors_layer));
    }

    // Static files for anything outside of the API, missing files
    // and non GET requests are a 404
    let public_files = ServeDir::new(&config.public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    Router::new()
        .merge(api_router)
        .fallback_service(public_files)
        .layer(Extension(services))
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
