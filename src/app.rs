use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/records", post(handlers::record_form))
        .route("/api/body_composition", get(handlers::get_payload))
        .route("/api/view", get(handlers::get_view))
        .route("/api/records", post(handlers::record))
        .with_state(state)
}
