//! Answer Service plus the ask flow that records a question and its answer
//! in the session transcript.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::prompts::{build_prompt_with_style, PromptStyle, ANSWER_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::matching::lookup::find_by_name;
use crate::matching::questions::is_catalog_question;
use crate::models::chat::ChatTurn;
use crate::session::SessionStore;

/// Turns a rendered prompt into an answer.
///
/// Carried in `AppState` as `Arc<dyn AnswerService>`. Each call is
/// independent; earlier turns are never sent back upstream.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn answer(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl AnswerService for LlmClient {
    async fn answer(&self, prompt: &str) -> Result<String, LlmError> {
        self.call_text(prompt, ANSWER_SYSTEM).await
    }
}

#[derive(Debug, Serialize)]
pub struct AskOutcome {
    pub question: ChatTurn,
    pub answer: ChatTurn,
}

/// Asks `question` about `candidate_name` within a session.
///
/// Appends the user turn and a pending placeholder, releases the session while
/// the upstream call runs, then settles the placeholder. On upstream failure
/// the placeholder becomes a failed turn and the error is returned; turns that
/// existed before the call are never touched.
pub async fn ask(
    sessions: &SessionStore,
    answerer: &dyn AnswerService,
    style: PromptStyle,
    session_id: Uuid,
    candidate_name: &str,
    question: &str,
) -> Result<AskOutcome, AppError> {
    if !is_catalog_question(question) {
        return Err(AppError::Validation(format!(
            "'{question}' is not one of the offered questions"
        )));
    }

    let (prompt, pending_index) = sessions
        .update(session_id, |session| {
            let resume = find_by_name(&session.resumes, candidate_name).ok_or_else(|| {
                AppError::NotFound(format!("Resume for {candidate_name} not found."))
            })?;
            let job_offer = session.job_offer.as_ref().ok_or_else(|| {
                AppError::Validation("Upload a job offer before asking questions".to_string())
            })?;

            let prompt =
                build_prompt_with_style(&resume.record, &job_offer.record, question, style);

            session.history.push_user(question);
            let pending_index = session.history.push_pending();
            Ok((prompt, pending_index))
        })
        .await?;

    info!("Session {session_id}: asking about {candidate_name}");
    let result = answerer.answer(&prompt).await;

    let outcome = sessions
        .update(session_id, |session| {
            let settled = match &result {
                Ok(text) => session.history.resolve(pending_index, text.as_str()),
                Err(e) => session
                    .history
                    .fail(pending_index, format!("Failed to get an answer: {e}")),
            };
            settled.map_err(|e| AppError::Internal(e.into()))?;

            let turns = session.history.turns();
            Ok(AskOutcome {
                question: turns[pending_index - 1].clone(),
                answer: turns[pending_index].clone(),
            })
        })
        .await?;

    match result {
        Ok(_) => Ok(outcome),
        Err(e) => {
            warn!("Session {session_id}: answer failed");
            Err(AppError::Service(e))
        }
    }
}
