use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/count", post(handlers::count_form))
        .route("/delete", post(handlers::delete_form))
        .route("/reset", post(handlers::reset_form))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/count", post(handlers::set_count))
        .route("/api/delete", post(handlers::delete_count))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
