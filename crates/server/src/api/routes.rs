use axum::{
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::middleware::{metrics_middleware, payment_middleware};
use super::{animals, handlers};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Interactive page static files, the target of navigation redirects
    let page_dir = state.config().server.page_dir.clone();

    // Matching endpoint, behind the payment gate
    let animal_routes = Router::new()
        .route(
            "/animals",
            get(animals::get_animal)
                .post(animals::post_animal)
                .options(animals::preflight),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            payment_middleware,
        ));

    // API routes
    let api_routes = Router::new()
        .merge(animal_routes)
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .with_state(state.clone());

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics))
        .with_state(state);

    // Serve the page with SPA fallback
    let index_path = page_dir.join("index.html");
    let serve_dir = ServeDir::new(&page_dir).fallback(ServeFile::new(index_path));

    Router::new()
        .nest("/api", api_routes)
        .merge(metrics_routes)
        .fallback_service(serve_dir)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
