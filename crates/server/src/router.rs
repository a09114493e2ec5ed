use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/chat", post(handlers::chat_handler))
        .route("/conversation", post(handlers::conversation_handler))
        .route("/search", post(handlers::search_handler))
        .route("/process-text", post(handlers::process_text_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
