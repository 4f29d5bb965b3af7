//! In-process provider fakes shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::embeddings::{Embedder, EmbeddingError};
use crate::llm_client::{CompletionModel, LlmError};

/// Embeds text as counts of a fixed keyword list, so relevance is predictable.
pub struct KeywordEmbedder {
    keywords: Vec<&'static str>,
    pub calls: AtomicUsize,
    fail: bool,
}

impl KeywordEmbedder {
    pub fn new(keywords: &[&'static str]) -> Self {
        Self {
            keywords: keywords.to_vec(),
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(&[])
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EmbeddingError::Api {
                status: 401,
                message: "Incorrect API key provided".to_string(),
            });
        }
        Ok(inputs
            .iter()
            .map(|text| {
                let lower = text.to_lowercase();
                self.keywords
                    .iter()
                    .map(|k| lower.matches(k).count() as f32)
                    .collect()
            })
            .collect())
    }
}

/// Returns a canned reply and records every prompt and temperature it receives.
pub struct ScriptedLlm {
    reply: Result<String, u16>,
    pub prompts: Mutex<Vec<(String, f32)>>,
}

impl ScriptedLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<(String, f32)> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionModel for ScriptedLlm {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(LlmError::Api {
                status: *status,
                message: "You exceeded your current quota".to_string(),
            }),
        }
    }
}
