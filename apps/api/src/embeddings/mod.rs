//! Embedding provider — turns chunk text into vectors for the similarity index.
//!
//! `AppState` holds an `Arc<dyn Embedder>`; the default backend is an
//! OpenAI-compatible `/embeddings` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Most inputs sent in one embeddings request. OpenAI rejects more than 2048.
pub const EMBEDDING_BATCH_SIZE: usize = 1000;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("provider returned {actual} embeddings for {expected} inputs")]
    CountMismatch { expected: usize, actual: usize },

    #[error("batch of {size} inputs exceeds the limit of {max}")]
    BatchTooLarge { size: usize, max: usize },
}

/// Computes one embedding per input, in input order.
/// Callers send at most `EMBEDDING_BATCH_SIZE` inputs per call.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Extracts the provider's error message from an OpenAI-style error body,
/// falling back to the raw body.
pub(crate) fn provider_error_message(body: String) -> String {
    serde_json::from_str::<OpenAiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Embeddings client for OpenAI-compatible endpoints. One request per batch.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(client: Client, base_url: &str, api_key: String, model: String) -> Self {
        Self {
            client,
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        if inputs.len() > EMBEDDING_BATCH_SIZE {
            return Err(EmbeddingError::BatchTooLarge {
                size: inputs.len(),
                max: EMBEDDING_BATCH_SIZE,
            });
        }

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: inputs,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message: provider_error_message(body),
            });
        }

        let mut parsed: EmbeddingResponse = response.json().await?;
        parsed.data.sort_by_key(|entry| entry.index);

        if parsed.data.len() != inputs.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: inputs.len(),
                actual: parsed.data.len(),
            });
        }

        debug!(
            "Embedded {} inputs with model {}",
            inputs.len(),
            self.model
        );

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parses_and_keeps_index() {
        let json = r#"{
            "object": "list",
            "data": [
                {"object": "embedding", "index": 1, "embedding": [0.5, 0.5]},
                {"object": "embedding", "index": 0, "embedding": [1.0, 0.0]}
            ],
            "model": "text-embedding-ada-002"
        }"#;
        let mut parsed: EmbeddingResponse = serde_json::from_str(json).unwrap();
        parsed.data.sort_by_key(|entry| entry.index);
        assert_eq!(parsed.data[0].embedding, vec![1.0, 0.0]);
        assert_eq!(parsed.data[1].embedding, vec![0.5, 0.5]);
    }

    #[test]
    fn test_provider_error_message_extracted() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(
            provider_error_message(body.to_string()),
            "Incorrect API key provided"
        );
    }

    #[test]
    fn test_provider_error_message_falls_back_to_body() {
        assert_eq!(provider_error_message("bad gateway".to_string()), "bad gateway");
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let embedder = OpenAiEmbedder::new(
            Client::new(),
            "https://api.openai.com/v1/",
            "sk-test".to_string(),
            "text-embedding-ada-002".to_string(),
        );
        assert_eq!(embedder.endpoint, "https://api.openai.com/v1/embeddings");
    }

    #[tokio::test]
    async fn test_empty_input_skips_request() {
        // Unroutable base URL: the call must return before any request is sent.
        let embedder = OpenAiEmbedder::new(
            Client::new(),
            "http://127.0.0.1:9",
            "sk-test".to_string(),
            "m".to_string(),
        );
        let vectors = embedder.embed(&[]).await.unwrap();
        assert!(vectors.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_batch_rejected_before_request() {
        let embedder = OpenAiEmbedder::new(
            Client::new(),
            "http://127.0.0.1:9",
            "sk-test".to_string(),
            "m".to_string(),
        );
        let inputs = vec!["chunk".to_string(); EMBEDDING_BATCH_SIZE + 1];
        let err = embedder.embed(&inputs).await.unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::BatchTooLarge { size: 1001, max: 1000 }
        ));
    }
}
