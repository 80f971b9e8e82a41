use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::{games, handlers, middleware::metrics_middleware};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Static assets path (configurable via env)
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());

    // API routes
    let api_routes = Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        // Game catalog
        .route("/games", get(games::list_games))
        .route("/games", post(games::create_game))
        .route("/games/{id}", put(games::update_game))
        .route("/games/{id}", delete(games::delete_game))
        .route("/games/search", post(games::search_games))
        .route("/games/populate", post(games::populate_games))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&static_dir))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
