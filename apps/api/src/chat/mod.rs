// Candidate Q&A: question catalog endpoints, prompt construction and the
// answer round trip. All upstream calls go through llm_client.

pub mod answer;
pub mod handlers;
pub mod prompts;
