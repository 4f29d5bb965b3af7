// Cold email generation: validate form → index JD → retrieve context → complete.
// All LLM calls go through llm_client::CompletionModel.

pub mod generator;
pub mod handlers;
pub mod prompts;
