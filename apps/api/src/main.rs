mod config;
mod embeddings;
mod errors;
mod generation;
mod indexing;
mod llm_client;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embeddings::OpenAiEmbedder;
use crate::indexing::splitter::{TextSplitter, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; a missing API key stops startup here
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cold Email API v{}", env!("CARGO_PKG_VERSION"));

    // One HTTP client shared by both providers. No timeout: calls block until the provider answers.
    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    let embedder = OpenAiEmbedder::new(
        http.clone(),
        &config.openai_base_url,
        config.openai_api_key.clone(),
        config.embedding_model.clone(),
    );
    info!("Embedding client initialized (model: {})", config.embedding_model);

    let llm = LlmClient::new(
        http,
        &config.openai_base_url,
        config.openai_api_key.clone(),
        config.completion_model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());

    let splitter = TextSplitter::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
        .context("Invalid text splitter parameters")?;
    info!(
        "Text splitter: chunk_size={} chunk_overlap={}",
        splitter.chunk_size(),
        splitter.chunk_overlap()
    );

    let state = AppState {
        embedder: Arc::new(embedder),
        llm: Arc::new(llm),
        splitter,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
