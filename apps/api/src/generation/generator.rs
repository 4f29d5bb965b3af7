//! Cold Email Generation — orchestrates the retrieval-augmented pipeline.
//!
//! Flow: validate form → split + embed JD into a fresh index → build the cold
//!       email prompt → embed prompt and retrieve top chunks → stuff context
//!       and prompt into the QA template → one completion call.
//!
//! The index is dropped when this function returns. Provider errors propagate
//! untouched; there is no retry and no fallback text.

use tracing::{debug, info};

use crate::embeddings::{Embedder, EmbeddingError};
use crate::errors::AppError;
use crate::generation::prompts::COLD_EMAIL_PROMPT_TEMPLATE;
use crate::indexing::index::SimilarityIndex;
use crate::indexing::index_job_description;
use crate::indexing::splitter::{DocumentChunk, TextSplitter};
use crate::llm_client::prompts::{fill_template, CONTEXT_SEPARATOR, QA_STUFF_PROMPT_TEMPLATE};
use crate::llm_client::{CompletionModel, TEMPERATURE};
use crate::models::form::FormInput;

/// Number of chunks retrieved as context for the completion.
pub const RETRIEVAL_K: usize = 4;

/// Output of one generation run.
#[derive(Debug, Clone)]
pub struct ColdEmailDraft {
    /// Model output, verbatim.
    pub email: String,
    pub chunks_indexed: usize,
    pub context_chunks: usize,
}

/// Runs the full pipeline. Validation happens first; an invalid form never
/// reaches a provider.
pub async fn generate_cold_email(
    form: &FormInput,
    splitter: &TextSplitter,
    embedder: &dyn Embedder,
    llm: &dyn CompletionModel,
) -> Result<ColdEmailDraft, AppError> {
    form.validate()?;

    let index = index_job_description(&form.job_description, splitter, embedder).await?;
    info!("Indexed job description into {} chunks", index.len());

    let prompt = build_cold_email_prompt(form);
    let context = retrieve_context(&index, &prompt, embedder, RETRIEVAL_K).await?;
    debug!("Retrieved {} context chunks", context.len());

    let qa_prompt = build_qa_prompt(&context, &prompt);
    let email = llm.complete(&qa_prompt, TEMPERATURE).await?;

    Ok(ColdEmailDraft {
        email,
        chunks_indexed: index.len(),
        context_chunks: context.len(),
    })
}

/// Fills the cold email instruction with all six personal/company fields, verbatim.
pub fn build_cold_email_prompt(form: &FormInput) -> String {
    fill_template(
        COLD_EMAIL_PROMPT_TEMPLATE,
        &[
            ("your_name", form.your_name.as_str()),
            ("your_experience", form.your_experience.as_str()),
            ("your_skills", form.your_skills.as_str()),
            ("company_name", form.company_name.as_str()),
            ("recruiter_name", form.recruiter_name.as_str()),
            ("platform", form.platform.as_str()),
        ],
    )
}

/// Stuffs retrieved chunks, most relevant first, ahead of the question.
pub fn build_qa_prompt(context: &[&DocumentChunk], question: &str) -> String {
    let context = context
        .iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR);

    fill_template(
        QA_STUFF_PROMPT_TEMPLATE,
        &[("context", context.as_str()), ("question", question)],
    )
}

/// Embeds the query and returns the `k` most similar chunks.
/// An empty index returns no context without calling the provider.
async fn retrieve_context<'a>(
    index: &'a SimilarityIndex,
    query: &str,
    embedder: &dyn Embedder,
    k: usize,
) -> Result<Vec<&'a DocumentChunk>, EmbeddingError> {
    if index.is_empty() {
        return Ok(Vec::new());
    }

    let vectors = embedder.embed(&[query.to_string()]).await?;
    let query_vector = vectors
        .into_iter()
        .next()
        .ok_or(EmbeddingError::CountMismatch {
            expected: 1,
            actual: 0,
        })?;

    Ok(index.top_k(&query_vector, k))
}
