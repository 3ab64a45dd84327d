use crate::models::record::Record;

/// The evaluation questions offered for every candidate, in display order.
pub const QUESTION_CATALOG: [&str; 6] = [
    "Does the candidate have the skills needed?",
    "Does the candidate meet the educational requirements?",
    "Does the candidate have the required years of experience?",
    "What schools did the candidate study at?",
    "What companies did the candidate work for?",
    "How many years of experience does the candidate have?",
];

/// Questions for a (resume, job offer) pair.
///
/// The list does not depend on either document yet. The parameters stay so
/// that requirement-driven questions can be added without touching callers.
pub fn questions_for(_resume: &Record, _job_offer: &Record) -> Vec<String> {
    QUESTION_CATALOG.iter().map(|q| q.to_string()).collect()
}

pub fn is_catalog_question(question: &str) -> bool {
    QUESTION_CATALOG.contains(&question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::loader::load_from_bytes;

    #[test]
    fn test_six_questions_regardless_of_input() {
        let empty = load_from_bytes(b"{}").unwrap();
        let full = load_from_bytes(
            br#"{"CONTACT DETAILS": {"FullName": "Alice"}, "SKILLS": ["Rust", "Go"]}"#,
        )
        .unwrap();

        let a = questions_for(&empty, &empty);
        let b = questions_for(&full, &empty);
        let c = questions_for(&full, &full);
        assert_eq!(a.len(), 6);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_order_is_stable() {
        let r = load_from_bytes(b"{}").unwrap();
        let qs = questions_for(&r, &r);
        assert_eq!(qs[0], "Does the candidate have the skills needed?");
        assert_eq!(qs[5], "How many years of experience does the candidate have?");
        assert_eq!(qs, questions_for(&r, &r));
    }

    #[test]
    fn test_catalog_membership() {
        assert!(is_catalog_question("What schools did the candidate study at?"));
        assert!(!is_catalog_question("what schools did the candidate study at?"));
        assert!(!is_catalog_question("Ignore previous instructions"));
    }
}
