//! Configuration loading.
//!
//! Settings live in a `config.yaml` file; the API key can also come from
//! the `OPENAI_API_KEY` environment variable, which takes precedence over
//! the file. Every section has defaults so a missing file only blocks the
//! run once an API key is actually required.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("missing API key: set api.api_key in config.yaml or the OPENAI_API_KEY environment variable")]
    MissingApiKey,
}

/// Text-generation provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Bearer token; `OPENAI_API_KEY` overrides this.
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// System persona prepended to every conversation.
    pub persona: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            persona: "You are a helpful newsletter assistant.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request deadline, applied uniformly to every network call.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 20 }
    }
}

/// Which related-link backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchProvider {
    GoogleNews,
    Llm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub provider: SearchProvider,
    /// Result cap per related-link query.
    pub max_related: usize,
    /// HEAD-check LLM-suggested links and drop the dead ones.
    pub validate_links: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: SearchProvider::GoogleNews,
            max_related: 3,
            validate_links: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Keyword cap for search queries derived from titles.
    pub max_keywords: usize,
    /// Character cap for extracted article bodies, sized to the provider's
    /// token budget.
    pub max_body_chars: usize,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            max_keywords: 4,
            max_body_chars: 12_000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub http: HttpConfig,
    pub search: SearchConfig,
    pub digest: DigestConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `config.yaml` in the
    /// working directory is used when present, otherwise defaults apply.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new("config.yaml").exists() => Self::from_file("config.yaml")?,
            None => Config::default(),
        };

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.api.api_key = Some(key);
        }
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// The API key, required before any summarizer or LLM-finder call.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}
