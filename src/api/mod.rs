//! HTTP routes.

pub mod dto;
pub mod memories;

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::require_auth;
use crate::state::AppState;

/// Build the full application router: memory routes behind the auth
/// middleware, wrapped in request tracing and a permissive CORS policy.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/memories",
            get(memories::list_memories).post(memories::create_memory),
        )
        .route(
            "/memories/{id}",
            get(memories::get_memory)
                .put(memories::update_memory)
                .delete(memories::delete_memory),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
