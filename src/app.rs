use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/law", get(handlers::law))
        .route("/privacy", get(handlers::privacy))
        .route("/thanks", get(handlers::thanks))
        .route("/data", get(handlers::data))
        .route("/report", get(handlers::report_form).post(handlers::submit_report_form))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/report", post(handlers::submit_report))
        .route("/api/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state)
}
