//! Axum route handlers for the candidate Q&A chat.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::answer::{ask, AskOutcome};
use crate::errors::AppError;
use crate::matching::lookup::find_by_name;
use crate::matching::questions::questions_for;
use crate::models::chat::ChatTurn;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub candidate: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub candidate_name: String,
    pub question: String,
}

/// GET /api/v1/sessions/:id/questions?name=
pub async fn handle_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<QuestionsQuery>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let session = state.sessions.get(id).await?;

    let resume = find_by_name(&session.resumes, &query.name)
        .ok_or_else(|| AppError::NotFound(format!("Resume for {} not found.", query.name)))?;
    let job_offer = session.job_offer.as_ref().ok_or_else(|| {
        AppError::Validation("Upload a job offer before asking questions".to_string())
    })?;

    Ok(Json(QuestionsResponse {
        candidate: resume.record.full_name().to_string(),
        questions: questions_for(&resume.record, &job_offer.record),
    }))
}

/// POST /api/v1/sessions/:id/ask
///
/// Sends one catalog question about one candidate upstream and returns the
/// recorded question/answer turns.
pub async fn handle_ask(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskOutcome>, AppError> {
    if request.candidate_name.trim().is_empty() {
        return Err(AppError::Validation(
            "candidate_name cannot be empty".to_string(),
        ));
    }

    let outcome = ask(
        &state.sessions,
        state.answerer.as_ref(),
        state.prompt_style,
        id,
        &request.candidate_name,
        &request.question,
    )
    .await?;

    Ok(Json(outcome))
}

/// GET /api/v1/sessions/:id/history
pub async fn handle_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChatTurn>>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(session.history.turns().to_vec()))
}
