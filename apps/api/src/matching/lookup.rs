use crate::models::record::Record;

/// Returns the first item whose `CONTACT DETAILS.FullName` equals `name`,
/// ignoring case. `None` means the candidate is simply not in the set.
///
/// Works over bare records and over uploads alike; both use this one rule.
pub fn find_by_name<'a, T: AsRef<Record>>(items: &'a [T], name: &str) -> Option<&'a T> {
    let wanted = name.to_lowercase();
    items
        .iter()
        .find(|item| item.as_ref().full_name().to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::loader::{load_from_bytes, LoadedDocument};

    fn resume(name: &str) -> Record {
        load_from_bytes(format!(r#"{{"CONTACT DETAILS": {{"FullName": "{name}"}}}}"#).as_bytes())
            .unwrap()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let records = vec![resume("Jane Doe"), resume("John Roe")];
        let a = find_by_name(&records, "Jane Doe").unwrap();
        let b = find_by_name(&records, "jane doe").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.full_name(), "Jane Doe");
    }

    #[test]
    fn test_empty_set_is_not_found() {
        let records: Vec<Record> = Vec::new();
        assert!(find_by_name(&records, "Jane Doe").is_none());
    }

    #[test]
    fn test_no_match_is_not_found() {
        let records = vec![resume("Jane Doe")];
        assert!(find_by_name(&records, "Carol").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let records = vec![resume("Jane Doe"), resume("JANE DOE")];
        let found = find_by_name(&records, "jane doe").unwrap();
        assert_eq!(found.full_name(), "Jane Doe");
    }

    #[test]
    fn test_record_without_name_matches_empty_query_only() {
        let records = vec![load_from_bytes(br#"{"SKILLS": []}"#).unwrap()];
        assert!(find_by_name(&records, "Jane").is_none());
        assert!(find_by_name(&records, "").is_some());
    }

    #[test]
    fn test_lookup_over_uploads() {
        let docs = vec![
            LoadedDocument {
                file_name: "alice.json".to_string(),
                record: resume("Alice Smith"),
            },
            LoadedDocument {
                file_name: "bob.json".to_string(),
                record: resume("Bob Lee"),
            },
        ];
        let found = find_by_name(&docs, "BOB LEE").unwrap();
        assert_eq!(found.file_name, "bob.json");
        assert!(find_by_name(&docs, "Carol").is_none());
    }
}
