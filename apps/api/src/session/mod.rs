//! Per-user session state: uploaded documents and the chat transcript.
//!
//! Each session owns its records outright. Nothing is shared between sessions
//! and nothing outlives [`SessionStore::end`].

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::documents::loader::LoadedDocument;
use crate::errors::AppError;
use crate::models::chat::ChatHistory;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub resumes: Vec<LoadedDocument>,
    pub job_offer: Option<LoadedDocument>,
    pub history: ChatHistory,
}

impl Session {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            resumes: Vec::new(),
            job_offer: None,
            history: ChatHistory::default(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            created_at: self.created_at,
            resume_files: self.resumes.iter().map(|d| d.file_name.clone()).collect(),
            candidates: self
                .resumes
                .iter()
                .map(|d| d.record.full_name().to_string())
                .collect(),
            job_offer_file: self.job_offer.as_ref().map(|d| d.file_name.clone()),
            chat_turns: self.history.turns().len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub resume_files: Vec<String>,
    pub candidates: Vec<String>,
    pub job_offer_file: Option<String>,
    pub chat_turns: usize,
}

/// In-memory session registry. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub async fn create(&self) -> Session {
        let session = Session::new();
        self.sessions.write().await.insert(session.id, session.clone());
        info!("Session {} created", session.id);
        session
    }

    /// Snapshot of the session as it is now.
    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| session_not_found(id))
    }

    /// Runs `f` against the live session under the write lock.
    pub async fn update<T, F>(&self, id: Uuid, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Session) -> Result<T, AppError>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        f(session)
    }

    /// Drops the session and everything it loaded.
    pub async fn end(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| info!("Session {id} ended"))
            .ok_or_else(|| session_not_found(id))
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
