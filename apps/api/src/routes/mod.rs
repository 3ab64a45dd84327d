pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::chat::handlers as chat;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions and documents
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_end_session),
        )
        .route(
            "/api/v1/sessions/:id/resumes",
            post(session::handle_upload_resumes),
        )
        .route(
            "/api/v1/sessions/:id/job-offer",
            put(session::handle_upload_job_offer),
        )
        .route("/api/v1/sessions/:id/scores", get(session::handle_scores))
        .route(
            "/api/v1/sessions/:id/candidates",
            get(session::handle_find_candidate),
        )
        // Chat
        .route("/api/v1/sessions/:id/questions", get(chat::handle_questions))
        .route("/api/v1/sessions/:id/ask", post(chat::handle_ask))
        .route("/api/v1/sessions/:id/history", get(chat::handle_history))
        .with_state(state)
}
