// Keyword relevance: prompt building, the model call, and turning the reply into a table.
// All LLM calls go through llm_client.

pub mod checker;
pub mod lenient_json;
pub mod models;
pub mod normalizer;
pub mod prompts;
