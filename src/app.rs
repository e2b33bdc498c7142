use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/legend", get(handlers::get_legend))
        .route("/api/classify", post(handlers::classify))
        .route("/api/calendar", post(handlers::build_calendar))
        .route("/api/members", get(handlers::list_members))
        .route("/api/members/:member/calendar", get(handlers::member_calendar))
        .route("/api/members/:member/records", put(handlers::import_records))
        .with_state(state)
}
