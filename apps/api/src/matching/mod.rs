// Candidate lookup, the evaluation question catalog and resume scoring.
// Pure functions over loaded records; no I/O here.

pub mod lookup;
pub mod questions;
pub mod scoring;
