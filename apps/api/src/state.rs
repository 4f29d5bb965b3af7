use std::sync::Arc;

use crate::embeddings::Embedder;
use crate::indexing::splitter::TextSplitter;
use crate::llm_client::CompletionModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every generation builds its own index.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable embedding backend. Default: OpenAiEmbedder.
    pub embedder: Arc<dyn Embedder>,
    /// Pluggable completion backend. Default: LlmClient.
    pub llm: Arc<dyn CompletionModel>,
    pub splitter: TextSplitter,
}
