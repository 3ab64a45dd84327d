//! Axum route handlers for sessions and document uploads.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::documents::loader::{load_from_bytes, load_many, FailedDocument, LoadedDocument};
use crate::errors::AppError;
use crate::matching::lookup::find_by_name;
use crate::matching::scoring::{score_documents, ScoredResume};
use crate::models::record::Record;
use crate::session::SessionSummary;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResumesResponse {
    pub loaded: Vec<String>,
    pub failed: Vec<FailedDocument>,
    pub total_resumes: usize,
}

#[derive(Debug, Serialize)]
pub struct JobOfferResponse {
    pub file_name: String,
    pub sections: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoresResponse {
    pub scorer_backend: &'static str,
    pub scores: Vec<ScoredResume>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateQuery {
    pub name: String,
}

/// Lookup result. A missing candidate is an ordinary answer, not an error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CandidateResponse {
    Found {
        found: bool,
        file_name: String,
        resume: Record,
    },
    Missing {
        found: bool,
        message: String,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionSummary>) {
    let session = state.sessions.create().await;
    (StatusCode::CREATED, Json(session.summary()))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(session.summary()))
}

/// DELETE /api/v1/sessions/:id
///
/// Ends the session; its documents and transcript are discarded.
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.end(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/resumes
///
/// Multipart upload of one or more resume JSON files. Each file is parsed on
/// its own; malformed files are reported back and the rest are kept.
pub async fn handle_upload_resumes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<UploadResumesResponse>, AppError> {
    // Fail on an unknown session before reading the body.
    state.sessions.get(id).await?;

    let files = read_files(multipart).await?;
    if files.is_empty() {
        return Err(AppError::Validation("No files uploaded".to_string()));
    }

    let report = load_many(files);
    let loaded: Vec<String> = report.loaded.iter().map(|d| d.file_name.clone()).collect();
    let failed = report.failed;

    let total_resumes = state
        .sessions
        .update(id, |session| {
            session.resumes.extend(report.loaded);
            Ok(session.resumes.len())
        })
        .await?;

    info!(
        "Session {id}: {} resume(s) loaded, {} rejected",
        loaded.len(),
        failed.len()
    );

    Ok(Json(UploadResumesResponse {
        loaded,
        failed,
        total_resumes,
    }))
}

/// PUT /api/v1/sessions/:id/job-offer
///
/// Multipart upload of exactly one job offer JSON file. Replaces any earlier offer.
pub async fn handle_upload_job_offer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<JobOfferResponse>, AppError> {
    state.sessions.get(id).await?;

    let mut files = read_files(multipart).await?;
    if files.len() != 1 {
        return Err(AppError::Validation(format!(
            "Expected exactly one job offer file, got {}",
            files.len()
        )));
    }
    let (file_name, bytes) = files.remove(0);
    let record = load_from_bytes(&bytes)?;

    let response = JobOfferResponse {
        file_name: file_name.clone(),
        sections: record.keys().map(str::to_string).collect(),
    };

    state
        .sessions
        .update(id, |session| {
            session.job_offer = Some(LoadedDocument { file_name, record });
            Ok(())
        })
        .await?;

    info!("Session {id}: job offer {} loaded", response.file_name);
    Ok(Json(response))
}

/// GET /api/v1/sessions/:id/scores
pub async fn handle_scores(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScoresResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    let job_offer = session.job_offer.as_ref().ok_or_else(|| {
        AppError::Validation("Please upload the job offer and resume files.".to_string())
    })?;
    if session.resumes.is_empty() {
        return Err(AppError::Validation(
            "Please upload the job offer and resume files.".to_string(),
        ));
    }

    let scores = score_documents(state.scorer.as_ref(), &session.resumes, &job_offer.record);

    Ok(Json(ScoresResponse {
        scorer_backend: state.scorer.backend(),
        scores,
    }))
}

/// GET /api/v1/sessions/:id/candidates?name=
pub async fn handle_find_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CandidateQuery>,
) -> Result<Json<CandidateResponse>, AppError> {
    let session = state.sessions.get(id).await?;

    let response = match find_by_name(&session.resumes, &query.name) {
        Some(doc) => CandidateResponse::Found {
            found: true,
            file_name: doc.file_name.clone(),
            resume: doc.record.clone(),
        },
        None => CandidateResponse::Missing {
            found: false,
            message: format!("Resume for {} not found.", query.name),
        },
    };

    Ok(Json(response))
}

/// Collects every file field as `(file_name, bytes)`. Fields without a file
/// name fall back to `document-<n>.json`.
async fn read_files(mut multipart: Multipart) -> Result<Vec<(String, Bytes)>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("document-{}.json", files.len() + 1));
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read {file_name}: {e}")))?;
        files.push((file_name, bytes));
    }

    Ok(files)
}
