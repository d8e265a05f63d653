use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/search", get(handlers::search))
        .route("/edit/open", post(handlers::edit_open))
        .route("/edit/save", post(handlers::edit_save))
        .route("/edit/cancel", post(handlers::edit_cancel))
        .route("/goal", post(handlers::goal_form))
        .route("/reset", post(handlers::reset_form))
        .route("/api/widget", get(handlers::get_widget))
        .route("/api/stream", get(handlers::stream))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/edit", post(handlers::edit))
        .route("/api/goal", post(handlers::set_goal))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
