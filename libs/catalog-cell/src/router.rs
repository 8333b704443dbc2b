use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use shared_utils::AppState;

use crate::handlers;

pub fn catalog_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_services).post(handlers::create_service))
        .route("/{service_id}", get(handlers::get_service).patch(handlers::update_service))
        .with_state(state)
}
