//! Generative related-link backend.
//!
//! Asks the text-generation model to list related articles as Markdown
//! links and pulls `[title](url)` pairs out of the free text with a
//! regular expression. This is a lossy adapter at the system boundary:
//! there is no guarantee the returned URLs are live or relevant, and a
//! response the pattern cannot match yields an empty list rather than an
//! error. An optional validation pass issues a HEAD request per link and
//! drops URLs that do not answer with a success status.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument, warn};

use super::{FinderError, RelatedLinkFinder};
use crate::api::TextGenerator;
use crate::models::RelatedLink;

static MD_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^)\s]+)\)").unwrap());

/// Related-link finder that asks the LLM to suggest articles.
#[derive(Debug, Clone)]
pub struct LlmFinder<G> {
    generator: G,
    client: reqwest::Client,
    validate_links: bool,
}

impl<G: TextGenerator> LlmFinder<G> {
    pub fn new(generator: G, client: reqwest::Client, validate_links: bool) -> Self {
        Self {
            generator,
            client,
            validate_links,
        }
    }

    /// Drop links that do not answer a HEAD request with a success status.
    async fn drop_dead_links(&self, links: Vec<RelatedLink>) -> Vec<RelatedLink> {
        let mut alive = Vec::with_capacity(links.len());
        for link in links {
            match self.client.head(&link.url).send().await {
                Ok(resp) if resp.status().is_success() => alive.push(link),
                Ok(resp) => {
                    debug!(url = %link.url, status = %resp.status(), "Dropping dead link")
                }
                Err(e) => warn!(url = %link.url, error = %e, "Dropping unreachable link"),
            }
        }
        alive
    }
}

impl<G: TextGenerator> RelatedLinkFinder for LlmFinder<G> {
    #[instrument(level = "info", skip(self))]
    async fn find(
        &self,
        query: &str,
        domain: &str,
        limit: usize,
    ) -> Result<Vec<RelatedLink>, FinderError> {
        let scope = if domain.is_empty() {
            "the web".to_string()
        } else {
            format!("the site {domain}")
        };
        let prompt = format!(
            "List up to {limit} recent articles from {scope} related to \"{query}\". \
             Respond with one Markdown link per line in the form [title](url) \
             and nothing else."
        );

        let text = self.generator.generate(&prompt).await?;
        let mut links = parse_markdown_links(&text);
        links.truncate(limit);

        if self.validate_links {
            links = self.drop_dead_links(links).await;
        }
        info!(count = links.len(), "LLM link suggestion completed");
        Ok(links)
    }
}

/// Extract `[title](url)` pairs from free text. Returns an empty vector
/// when the pattern matches nothing.
pub(crate) fn parse_markdown_links(text: &str) -> Vec<RelatedLink> {
    MD_LINK_RE
        .captures_iter(text)
        .map(|caps| RelatedLink {
            title: caps[1].trim().to_string(),
            url: caps[2].to_string(),
        })
        .collect()
}
