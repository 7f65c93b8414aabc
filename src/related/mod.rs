//! Related-link discovery over interchangeable search backends.
//!
//! Two backends exist:
//!
//! - [`google_news::GoogleNewsFinder`]: queries the Google News RSS search
//!   endpoint restricted to the article's domain
//! - [`llm::LlmFinder`]: asks the text-generation model to list related
//!   articles and parses Markdown links out of the free text (best-effort,
//!   lossy, with an optional liveness check)
//!
//! Exclusion is the caller's job: [`apply_exclusions`] drops already-used
//! URLs, and the caller adds the kept URLs to its accumulator immediately
//! after each batch so no link repeats across digest sections.

pub mod google_news;
pub mod llm;

use itertools::Itertools;
use std::collections::HashSet;
use thiserror::Error;

use crate::api::GenerateError;
use crate::models::RelatedLink;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("feed parse error: {0}")]
    Parse(String),
    #[error("generation failed: {0}")]
    Generate(#[from] GenerateError),
}

/// Seam for related-link search backends.
pub trait RelatedLinkFinder {
    /// Find up to `limit` links related to `query`, restricted to `domain`
    /// when the backend supports it. An empty `domain` means no restriction.
    async fn find(
        &self,
        query: &str,
        domain: &str,
        limit: usize,
    ) -> Result<Vec<RelatedLink>, FinderError>;
}

/// Drop links whose URL is already used, deduplicating within the batch.
///
/// Every returned link's URL is guaranteed absent from `used` at the time
/// of inclusion.
pub fn apply_exclusions(links: Vec<RelatedLink>, used: &HashSet<String>) -> Vec<RelatedLink> {
    links
        .into_iter()
        .filter(|l| !used.contains(&l.url))
        .unique_by(|l| l.url.clone())
        .collect()
}
