use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Section holding the candidate's identity fields.
pub const CONTACT_SECTION: &str = "CONTACT DETAILS";
/// Field inside [`CONTACT_SECTION`] used for candidate lookup.
pub const FULL_NAME_FIELD: &str = "FullName";

/// A parsed resume or job offer: a free-form JSON object.
///
/// No schema is enforced. The only field the service reads is
/// `CONTACT DETAILS.FullName`, and a missing one is treated as an empty name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `CONTACT DETAILS.FullName`, or `""` when either level is absent or not a string.
    pub fn full_name(&self) -> &str {
        self.0
            .get(CONTACT_SECTION)
            .and_then(|contact| contact.get(FULL_NAME_FIELD))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}

/// Pretty-printed JSON. This is the text embedded in prompts.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string_pretty(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => Record::new(map),
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn test_full_name_present() {
        let r = record(json!({"CONTACT DETAILS": {"FullName": "Jane Doe"}}));
        assert_eq!(r.full_name(), "Jane Doe");
    }

    #[test]
    fn test_full_name_missing_section_is_empty() {
        let r = record(json!({"SKILLS": ["Rust"]}));
        assert_eq!(r.full_name(), "");
    }

    #[test]
    fn test_full_name_non_string_is_empty() {
        let r = record(json!({"CONTACT DETAILS": {"FullName": 42}}));
        assert_eq!(r.full_name(), "");
    }

    #[test]
    fn test_display_is_pretty_json() {
        let r = record(json!({"a": 1}));
        assert_eq!(r.to_string(), "{\n  \"a\": 1\n}");
    }
}
