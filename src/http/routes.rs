use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Question banks
        .route("/companies", get(handlers::list_companies))
        // Session control
        .route("/interviews/start", post(handlers::start_interview))
        .route("/interviews/:session_id/ask", post(handlers::ask_question))
        .route("/interviews/:session_id/skip", post(handlers::skip_thinking))
        .route(
            "/interviews/:session_id/stop",
            post(handlers::stop_recording),
        )
        .route(
            "/interviews/:session_id/cancel",
            post(handlers::cancel_interview),
        )
        // Audio ingest
        .route(
            "/interviews/:session_id/frames",
            post(handlers::push_frames),
        )
        // Session queries
        .route(
            "/interviews/:session_id/status",
            get(handlers::get_status),
        )
        .route(
            "/interviews/:session_id/result",
            get(handlers::get_result),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
