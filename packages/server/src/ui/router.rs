//! Route table.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handler, state::AppState};

/// Build the HTTP router for the given state.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handler::health_check))
        .route(
            "/participants",
            post(handler::register_participant).get(handler::list_participants),
        )
        .route(
            "/messages",
            post(handler::post_message).get(handler::list_messages),
        )
        .route("/status", post(handler::heartbeat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
