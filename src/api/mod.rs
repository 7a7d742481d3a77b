mod handlers;
pub mod problem;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::service::PlanetService;
use problem::ProblemTypes;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub planets: Arc<PlanetService>,
    pub problems: ProblemTypes,
}

pub fn create_router(service: PlanetService, config: ApiConfig) -> Router {
    let state = AppState {
        planets: Arc::new(service),
        problems: ProblemTypes::new(config.problem_base_uri.clone()),
    };

    Router::new()
        .route(
            "/api/planets",
            get(handlers::list_planets).post(handlers::create_planet),
        )
        .route("/api/planets/search", get(handlers::search_planet))
        .route(
            "/api/planets/{id}",
            get(handlers::get_planet)
                .put(handlers::update_planet)
                .delete(handlers::delete_planet),
        )
        .route("/health", get(handlers::health))
        .fallback(handlers::no_route)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(config.cors_layer()),
        )
        .with_state(state)
}
