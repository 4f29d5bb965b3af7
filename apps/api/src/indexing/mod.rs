// Document indexing: job description → chunks → embeddings → in-memory index.
// Everything here lives for a single request. Nothing touches the filesystem.

pub mod index;
pub mod splitter;

use tracing::debug;

use crate::embeddings::{Embedder, EmbeddingError};
use crate::indexing::index::SimilarityIndex;
use crate::indexing::splitter::TextSplitter;

/// Splits the job description and embeds every chunk into a fresh index.
pub async fn index_job_description(
    job_description: &str,
    splitter: &TextSplitter,
    embedder: &dyn Embedder,
) -> Result<SimilarityIndex, EmbeddingError> {
    let chunks = splitter.split(job_description);
    debug!(
        "Split job description ({} chars) into {} chunks",
        job_description.chars().count(),
        chunks.len()
    );
    SimilarityIndex::build(chunks, embedder).await
}
