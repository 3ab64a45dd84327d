use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::record::Record;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
}

/// Where a document comes from.
pub enum DocumentSource<'a> {
    // Library entry point for documents on disk; the HTTP surface only receives uploads.
    #[allow(dead_code)]
    Path(&'a Path),
    Reader(Box<dyn Read + 'a>),
}

/// Loads a record from a path or an open stream.
pub fn load(source: DocumentSource<'_>) -> Result<Record, ParseError> {
    match source {
        DocumentSource::Path(path) => load_from_path(path),
        DocumentSource::Reader(reader) => load_from_reader(reader),
    }
}

pub fn load_from_path(path: &Path) -> Result<Record, ParseError> {
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(BufReader::new(file))
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<Record, ParseError> {
    let value: Value = serde_json::from_reader(reader)?;
    into_record(value)
}

/// Uploaded file contents, read through the same path as any other stream.
pub fn load_from_bytes(bytes: &[u8]) -> Result<Record, ParseError> {
    load(DocumentSource::Reader(Box::new(bytes)))
}

fn into_record(value: Value) -> Result<Record, ParseError> {
    match value {
        Value::Object(map) => Ok(Record::new(map)),
        Value::Array(_) => Err(ParseError::NotAnObject("an array")),
        Value::String(_) => Err(ParseError::NotAnObject("a string")),
        Value::Number(_) => Err(ParseError::NotAnObject("a number")),
        Value::Bool(_) => Err(ParseError::NotAnObject("a boolean")),
        Value::Null => Err(ParseError::NotAnObject("null")),
    }
}

/// A successfully parsed upload together with the name it was uploaded under.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedDocument {
    pub file_name: String,
    pub record: Record,
}

impl AsRef<Record> for LoadedDocument {
    fn as_ref(&self) -> &Record {
        &self.record
    }
}

/// A document that could not be parsed. Carries the error text only.
#[derive(Debug, Clone, Serialize)]
pub struct FailedDocument {
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct LoadReport {
    pub loaded: Vec<LoadedDocument>,
    pub failed: Vec<FailedDocument>,
}

/// Parses each `(file_name, bytes)` pair on its own. One malformed document
/// lands in `failed` and does not stop the rest from loading.
pub fn load_many<I, N, B>(documents: I) -> LoadReport
where
    I: IntoIterator<Item = (N, B)>,
    N: Into<String>,
    B: AsRef<[u8]>,
{
    let mut report = LoadReport::default();

    for (file_name, bytes) in documents {
        let file_name = file_name.into();
        match load_from_bytes(bytes.as_ref()) {
            Ok(record) => {
                debug!("Loaded document {file_name}");
                report.loaded.push(LoadedDocument { file_name, record });
            }
            Err(e) => {
                warn!("Skipping document {file_name}: {e}");
                report.failed.push(FailedDocument {
                    file_name,
                    error: e.to_string(),
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const RESUME_JSON: &str = r#"{
        "CONTACT DETAILS": {"FullName": "Alice Smith", "Email": "alice@example.com"},
        "SKILLS": ["Rust", "SQL"],
        "EDUCATION": {"School": "MIT", "Degree": "BSc"},
        "YEARS": 7
    }"#;

    #[test]
    fn test_top_level_keys_match_input() {
        let record = load_from_bytes(RESUME_JSON.as_bytes()).unwrap();
        let mut keys: Vec<&str> = record.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["CONTACT DETAILS", "EDUCATION", "SKILLS", "YEARS"]);
        assert_eq!(record.full_name(), "Alice Smith");
    }

    #[test]
    fn test_load_from_reader() {
        let record = load(DocumentSource::Reader(Box::new(Cursor::new(RESUME_JSON)))).unwrap();
        assert_eq!(record.full_name(), "Alice Smith");
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RESUME_JSON.as_bytes()).unwrap();

        let record = load(DocumentSource::Path(file.path())).unwrap();
        assert_eq!(record.full_name(), "Alice Smith");
    }

    #[test]
    fn test_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = load_from_bytes(b"{\"SKILLS\": [\"Rust\",").unwrap_err();
        assert!(matches!(err, ParseError::Malformed(_)));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = load_from_bytes(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ParseError::NotAnObject("an array")));
    }

    #[test]
    fn test_load_many_isolates_failures() {
        let report = load_many(vec![
            ("alice.json", RESUME_JSON.as_bytes().to_vec()),
            ("broken.json", b"not json".to_vec()),
            ("bob.json", br#"{"CONTACT DETAILS": {"FullName": "Bob Lee"}}"#.to_vec()),
        ]);

        let loaded: Vec<&str> = report.loaded.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(loaded, vec!["alice.json", "bob.json"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].file_name, "broken.json");
    }
}
