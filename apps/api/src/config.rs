use anyhow::{Context, Result};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o-mini";

/// Application configuration loaded from environment variables.
/// Startup fails if the provider API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub embedding_model: String,
    pub completion_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Config {
            openai_api_key: require_var(&lookup, "OPENAI_API_KEY")?,
            openai_base_url: optional("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            embedding_model: optional("OPENAI_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            completion_model: optional("OPENAI_COMPLETION_MODEL", DEFAULT_COMPLETION_MODEL),
            port: optional("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG", "info"),
        })
    }
}

fn require_var<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    anyhow::ensure!(
        !value.trim().is_empty(),
        "Required environment variable '{key}' is empty"
    );
    Ok(value.trim().to_string())
}
