// AI enrichment for personas.
// Provider calls go through llm_client only.
// Each request calls the generator at most once and never retries.

pub mod experience;
pub mod handlers;
pub mod parse;
pub mod prompts;
pub mod service;
