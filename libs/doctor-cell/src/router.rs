use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, patch},
};

use shared_utils::AppState;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Doctor registry
        .route("/", get(handlers::list_doctors).post(handlers::create_doctor))
        .route("/{doctor_id}", get(handlers::get_doctor))

        // Weekly schedule: bulk replace plus single-day patch
        .route("/{doctor_id}/schedule", get(handlers::get_weekly_schedule).put(handlers::replace_weekly_schedule))
        .route("/{doctor_id}/schedule/{day_of_week}", patch(handlers::update_weekly_day))

        // Day-level and break exceptions
        .route("/{doctor_id}/exceptions", get(handlers::list_exceptions).post(handlers::create_exception))
        .route("/{doctor_id}/exceptions/{exception_id}", delete(handlers::delete_exception))
        .route("/{doctor_id}/day", get(handlers::get_day_schedule))

        .with_state(state)
}
