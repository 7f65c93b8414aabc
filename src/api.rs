//! LLM text generation over an OpenAI-compatible chat-completions API.
//!
//! The [`TextGenerator`] trait is the seam between the pipeline and the
//! provider: the real [`ChatClient`] posts to `{base_url}/chat/completions`,
//! and tests substitute stubs. Generation failures are never retried; a
//! single failure is terminal for that article's summary and surfaces in
//! the digest as the [`SUMMARY_UNAVAILABLE`] placeholder.

use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ArticleContent, ArticleRef, Summary};
use crate::utils::truncate_for_log;

/// Placeholder summary text rendered when generation fails.
pub const SUMMARY_UNAVAILABLE: &str = "⚠️ Summary unavailable";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Seam for text generation.
///
/// Implementors send a prompt to a model and return the generated text.
pub trait TextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Instruction style for one summary, selected by the article's digest slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStyle {
    Main,
    Secondary,
    Quick,
    Recommended,
}

impl SummaryStyle {
    pub fn instruction(&self) -> &'static str {
        match self {
            SummaryStyle::Main => {
                "Summarize this article as the lead story of a newsletter. \
                 Keep it clear and engaging, three to four sentences."
            }
            SummaryStyle::Secondary => {
                "Summarize this article as a secondary newsletter story, \
                 two to three sentences."
            }
            SummaryStyle::Quick => {
                "Summarize this article in a single punchy sentence for a \
                 quick-reads list."
            }
            SummaryStyle::Recommended => {
                "In one short sentence, say why this article is worth reading."
            }
        }
    }
}

/// Build the full prompt for one article.
pub fn summary_prompt(style: SummaryStyle, content: &ArticleContent) -> String {
    format!(
        "{}\n\nTitle: {}\n\n{}",
        style.instruction(),
        content.title,
        content.body
    )
}

/// Summarize one article, converting any failure into the placeholder.
///
/// The body is already length-capped by the fetcher; no further validation
/// happens here. One outbound API call, no retry.
#[instrument(level = "info", skip_all, fields(url = %source.url, style = ?style))]
pub async fn summarize<G: TextGenerator>(
    generator: &G,
    style: SummaryStyle,
    content: &ArticleContent,
    source: &ArticleRef,
) -> Summary {
    let prompt = summary_prompt(style, content);
    let text = match generator.generate(&prompt).await {
        Ok(text) => {
            debug!(bytes = text.len(), "Generated summary");
            text
        }
        Err(e) => {
            warn!(error = %e, "Summary generation failed; using placeholder");
            SUMMARY_UNAVAILABLE.to_string()
        }
    };
    Summary {
        text,
        source: source.clone(),
    }
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    persona: String,
}

impl ChatClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            persona: persona.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl TextGenerator for ChatClient {
    #[instrument(level = "info", skip_all)]
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.persona.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
        };

        let t0 = Instant::now();
        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, elapsed_ms = t0.elapsed().as_millis() as u64, "Chat API call failed");
            return Err(GenerateError::Status(status));
        }

        let json: serde_json::Value = resp.json().await?;
        json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| GenerateError::Malformed(truncate_for_log(&json.to_string(), 200)))
    }
}
