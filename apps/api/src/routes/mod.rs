pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::templates::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Templates API
        .route("/api/v1/templates", get(handlers::handle_list_templates))
        .route("/api/v1/templates/:name", get(handlers::handle_get_template))
        .route(
            "/api/v1/templates/:name/render",
            post(handlers::handle_render),
        )
        .route(
            "/api/v1/templates/:name/validate",
            post(handlers::handle_validate),
        )
        .with_state(state)
}
