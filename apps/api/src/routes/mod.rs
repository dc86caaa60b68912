pub mod analyze;
pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/session", get(analyze::handle_session))
        .route("/api/v1/analyze", post(analyze::handle_analyze))
        .route("/api/v1/reset", post(analyze::handle_reset))
        // No upload size limit is enforced prior to extraction.
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}
