//! Pipeline orchestration.
//!
//! Runs the four stages per URL, strictly sequentially and in input order:
//! fetch, keyword extraction, related-link search, summarization. The
//! exclusion set of already-used URLs is an explicit accumulator owned by
//! the run, seeded with every input URL and updated immediately after each
//! related-link batch.
//!
//! The only fatal error is an empty URL list, raised before any network
//! activity. Everything downstream degrades to placeholders.

use chrono::Local;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::api::{summarize, SummaryStyle, TextGenerator};
use crate::digest::assemble;
use crate::keywords::extract_keywords;
use crate::models::{ArticleContent, ArticleRef, Digest, DigestEntry, SectionKind};
use crate::related::{apply_exclusions, RelatedLinkFinder};
use crate::utils::time_of_day;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("please enter at least one URL")]
    NoUrls,
}

/// Seam for article fetching, so tests can run without a network.
pub trait ArticleFetcher {
    async fn fetch(&self, url: &str) -> ArticleContent;
}

/// Production fetcher over the shared HTTP client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    body_cap: usize,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client, body_cap: usize) -> Self {
        Self { client, body_cap }
    }
}

impl ArticleFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> ArticleContent {
        crate::fetch::fetch_article(&self.client, url, self.body_cap).await
    }
}

/// Per-run knobs, sourced from the config file.
#[derive(Debug, Clone)]
pub struct DigestOptions {
    pub max_keywords: usize,
    pub max_related: usize,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            max_keywords: crate::keywords::DEFAULT_MAX_KEYWORDS,
            max_related: 3,
        }
    }
}

fn style_for(section: SectionKind) -> SummaryStyle {
    match section {
        SectionKind::Main => SummaryStyle::Main,
        SectionKind::Other => SummaryStyle::Secondary,
        SectionKind::QuickRead => SummaryStyle::Quick,
        SectionKind::Recommended => SummaryStyle::Recommended,
    }
}

/// Run the full pipeline over `urls` and assemble the digest.
///
/// Blank lines and surrounding whitespace in the input are ignored. The
/// entry at index 0 becomes the main story; see [`SectionKind::for_index`]
/// for the rest of the slotting rule.
#[instrument(level = "info", skip_all, fields(urls = urls.len()))]
pub async fn run_digest<F, G, R>(
    fetcher: &F,
    generator: &G,
    finder: &R,
    urls: &[String],
    options: &DigestOptions,
) -> Result<Digest, DigestError>
where
    F: ArticleFetcher,
    G: TextGenerator,
    R: RelatedLinkFinder,
{
    let urls: Vec<String> = urls
        .iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect();
    if urls.is_empty() {
        return Err(DigestError::NoUrls);
    }

    // One URL at a time, in input order. The exclusion set rides along as
    // an explicit accumulator instead of ambient mutable state.
    let used: HashSet<String> = urls.iter().cloned().collect();
    let (entries, _used) = stream::iter(urls.iter().enumerate())
        .fold(
            (Vec::with_capacity(urls.len()), used),
            |(mut entries, mut used), (i, url)| async move {
                let source = ArticleRef::new(url.clone());
                let content = fetcher.fetch(url).await;

                let query = extract_keywords(&content.title, options.max_keywords);
                let domain = source.domain().unwrap_or_default();

                let related = match finder.find(&query, &domain, options.max_related).await {
                    Ok(links) => apply_exclusions(links, &used),
                    Err(e) => {
                        warn!(%url, error = %e, "Related-link search failed; continuing without links");
                        Vec::new()
                    }
                };
                // Claim these URLs right away so later articles cannot repeat them.
                for link in &related {
                    used.insert(link.url.clone());
                }

                let section = SectionKind::for_index(i);
                let summary = summarize(generator, style_for(section), &content, &source).await;

                info!(index = i, %url, ?section, related = related.len(), "Processed article");
                entries.push(DigestEntry {
                    source,
                    content,
                    summary,
                    related,
                });
                (entries, used)
            },
        )
        .await;

    let local_date = Local::now().date_naive().to_string();
    Ok(assemble(entries, local_date, time_of_day()))
}
