use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content shown while an answer is still being generated.
pub const PENDING_PLACEHOLDER: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    Complete,
    Pending,
    Failed,
}

/// One message in a session's conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
    pub status: TurnStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq)]
pub enum HistoryError {
    #[error("No chat turn at index {0}")]
    NoSuchTurn(usize),

    #[error("Chat turn {0} is not pending")]
    NotPending(usize),
}

/// Append-only conversation transcript.
///
/// The only in-place change allowed is turning a pending assistant turn into
/// its answer or its failure; every other turn is frozen once pushed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn {
            role: ChatRole::User,
            content: content.into(),
            status: TurnStatus::Complete,
            created_at: Utc::now(),
        });
    }

    /// Appends an assistant placeholder and returns its index for later resolution.
    pub fn push_pending(&mut self) -> usize {
        self.turns.push(ChatTurn {
            role: ChatRole::Assistant,
            content: PENDING_PLACEHOLDER.to_string(),
            status: TurnStatus::Pending,
            created_at: Utc::now(),
        });
        self.turns.len() - 1
    }

    pub fn resolve(&mut self, index: usize, answer: impl Into<String>) -> Result<(), HistoryError> {
        self.settle(index, answer.into(), TurnStatus::Complete)
    }

    pub fn fail(&mut self, index: usize, reason: impl Into<String>) -> Result<(), HistoryError> {
        self.settle(index, reason.into(), TurnStatus::Failed)
    }

    fn settle(&mut self, index: usize, content: String, status: TurnStatus) -> Result<(), HistoryError> {
        let turn = self
            .turns
            .get_mut(index)
            .ok_or(HistoryError::NoSuchTurn(index))?;
        if turn.status != TurnStatus::Pending {
            return Err(HistoryError::NotPending(index));
        }
        turn.content = content;
        turn.status = status;
        turn.created_at = Utc::now();
        Ok(())
    }
}
