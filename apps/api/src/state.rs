use std::sync::Arc;

use crate::chat::answer::AnswerService;
use crate::chat::prompts::PromptStyle;
use crate::matching::scoring::ResumeScorer;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Upstream text generation. Default: `LlmClient`.
    pub answerer: Arc<dyn AnswerService>,
    /// Pluggable resume scorer. Default: `ZeroScorer`.
    pub scorer: Arc<dyn ResumeScorer>,
    pub prompt_style: PromptStyle,
}
