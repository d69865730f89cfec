use axum::{Router, routing::get};

use crate::{
    handlers::{
        health::health_handler,
        properties::{get_property_handler, list_properties_handler},
    },
    state::AppState,
};

/// All HTTP routes. Layers (CORS, tracing) are applied by the caller.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/properties", get(list_properties_handler))
        .route("/api/properties/{id}", get(get_property_handler))
        .with_state(state)
}
