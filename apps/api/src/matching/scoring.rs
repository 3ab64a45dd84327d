//! Resume scoring: pluggable, trait-based scorer over a job offer.
//!
//! Default: `ZeroScorer`. No scoring rules exist yet; every resume gets 0.
//! `AppState` holds an `Arc<dyn ResumeScorer>` so a real scorer can be swapped
//! in at startup without touching the endpoint or its response shape.

use serde::Serialize;

use crate::documents::loader::LoadedDocument;
use crate::models::record::Record;

/// Implement this to add real scoring. Implementations must return exactly
/// one score per resume, in input order, and be deterministic.
pub trait ResumeScorer: Send + Sync {
    fn score(&self, resumes: &[Record], job_offer: &Record) -> Vec<f64>;

    /// Label reported alongside scores.
    fn backend(&self) -> &'static str;
}

/// Placeholder scorer: 0 for every resume.
pub struct ZeroScorer;

impl ResumeScorer for ZeroScorer {
    fn score(&self, resumes: &[Record], _job_offer: &Record) -> Vec<f64> {
        vec![0.0; resumes.len()]
    }

    fn backend(&self) -> &'static str {
        "zero"
    }
}

/// A score paired with the upload it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredResume {
    pub file_name: String,
    pub candidate: String,
    pub score: f64,
}

/// Runs `scorer` and zips the result back onto the uploads.
///
/// A scorer that returns the wrong number of scores is a bug in that scorer;
/// missing entries fall back to 0 rather than misaligning rows.
pub fn score_documents(
    scorer: &dyn ResumeScorer,
    documents: &[LoadedDocument],
    job_offer: &Record,
) -> Vec<ScoredResume> {
    let records: Vec<Record> = documents.iter().map(|d| d.record.clone()).collect();
    let scores = scorer.score(&records, job_offer);

    if scores.len() != documents.len() {
        tracing::error!(
            "Scorer '{}' returned {} scores for {} resumes",
            scorer.backend(),
            scores.len(),
            documents.len()
        );
    }

    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| ScoredResume {
            file_name: doc.file_name.clone(),
            candidate: doc.record.full_name().to_string(),
            score: scores.get(i).copied().unwrap_or(0.0),
        })
        .collect()
}
