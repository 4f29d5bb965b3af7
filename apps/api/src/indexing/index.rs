use std::cmp::Ordering;

use tracing::debug;

use crate::embeddings::{Embedder, EmbeddingError, EMBEDDING_BATCH_SIZE};
use crate::indexing::splitter::DocumentChunk;

/// Ephemeral in-memory index pairing chunks with their embeddings.
/// Built per request and dropped with it.
#[derive(Debug, Default)]
pub struct SimilarityIndex {
    entries: Vec<(DocumentChunk, Vec<f32>)>,
}

impl SimilarityIndex {
    /// Embeds every chunk, `EMBEDDING_BATCH_SIZE` per provider call, and
    /// indexes the results in chunk order.
    pub async fn build(
        chunks: Vec<DocumentChunk>,
        embedder: &dyn Embedder,
    ) -> Result<Self, EmbeddingError> {
        if chunks.is_empty() {
            return Ok(Self::default());
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(EMBEDDING_BATCH_SIZE) {
            let embedded = embedder.embed(batch).await?;
            if embedded.len() != batch.len() {
                return Err(EmbeddingError::CountMismatch {
                    expected: batch.len(),
                    actual: embedded.len(),
                });
            }
            vectors.extend(embedded);
        }
        debug!(
            "Embedded {} chunks in {} batches",
            texts.len(),
            texts.len().div_ceil(EMBEDDING_BATCH_SIZE)
        );

        Ok(Self {
            entries: chunks.into_iter().zip(vectors).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns up to `k` chunks, most similar to `query` first.
    /// Ties keep source order.
    pub fn top_k(&self, query: &[f32], k: usize) -> Vec<&DocumentChunk> {
        let mut scored: Vec<(f32, &DocumentChunk)> = self
            .entries
            .iter()
            .map(|(chunk, vector)| (cosine_similarity(query, vector), chunk))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        scored.into_iter().map(|(_, chunk)| chunk).collect()
    }
}

/// Cosine similarity of two vectors. Mismatched lengths or zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
