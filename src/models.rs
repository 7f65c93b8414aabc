//! Data models for articles and the assembled digest.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`ArticleRef`]: identity of one input article (its URL)
//! - [`ArticleContent`]: extracted title/body/image for one article
//! - [`Summary`]: generated (or placeholder) summary text
//! - [`RelatedLink`]: a title/URL pair discovered by a search backend
//! - [`SectionKind`]: the digest section an article slots into
//! - [`Digest`]: the single assembled output document for one run

use serde::{Deserialize, Serialize};

use crate::utils::host_of;

/// Identity of one input article.
///
/// The URL doubles as the deduplication key across the quick-reads and
/// recommended-reads sections of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleRef {
    /// The article URL as supplied by the user.
    pub url: String,
}

impl ArticleRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Host portion of the URL, without a leading `www.`.
    ///
    /// Used to restrict related-link searches to the article's own site.
    pub fn domain(&self) -> Option<String> {
        host_of(&self.url)
    }
}

/// Extracted content for one article.
///
/// Produced by the fetcher. An empty `body` is a valid (if uninformative)
/// result, not a distinguishable error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleContent {
    /// Page title; falls back to the URL when extraction finds nothing.
    pub title: String,
    /// Space-joined paragraph text, truncated to the configured cap.
    pub body: String,
    /// Representative image, when the page declares one.
    pub image_url: Option<String>,
}

impl ArticleContent {
    /// Fallback content for a URL that could not be fetched or parsed.
    pub fn fallback(url: &str) -> Self {
        Self {
            title: url.to_string(),
            body: String::new(),
            image_url: None,
        }
    }
}

/// Generated summary text for one article.
///
/// On generation failure the text is the [`crate::api::SUMMARY_UNAVAILABLE`]
/// placeholder; renderers treat both cases identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub source: ArticleRef,
}

/// A related article discovered by a search backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedLink {
    pub title: String,
    pub url: String,
}

/// The digest section an article belongs to, by its input position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Main,
    Other,
    QuickRead,
    Recommended,
}

impl SectionKind {
    /// Canonical slotting rule: index 0 is the main story, 1-2 are other
    /// stories, 3-5 are quick reads, 6 and up are recommended reads.
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => SectionKind::Main,
            1..=2 => SectionKind::Other,
            3..=5 => SectionKind::QuickRead,
            _ => SectionKind::Recommended,
        }
    }
}

/// One article's fully processed result: content, summary, related links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestEntry {
    pub source: ArticleRef,
    pub content: ArticleContent,
    pub summary: Summary,
    /// Related links for this article, already exclusion-filtered.
    pub related: Vec<RelatedLink>,
}

impl DigestEntry {
    /// Title/URL pair for rendering this article as a bare list item.
    pub fn as_link(&self) -> RelatedLink {
        RelatedLink {
            title: self.content.title.clone(),
            url: self.source.url.clone(),
        }
    }
}

/// The single assembled output document for one run.
///
/// Assembled once, never mutated afterward, and not persisted beyond the
/// rendered output files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digest {
    /// Date of publication in `YYYY-MM-DD` format.
    pub local_date: String,
    /// Edition name: "morning", "afternoon", or "evening".
    pub edition: String,
    /// Introductory paragraph shown at the top of the digest.
    pub intro: String,
    /// The main story (index 0), absent only for an empty entry list.
    pub main: Option<DigestEntry>,
    /// Secondary stories (indices 1-2).
    pub other: Vec<DigestEntry>,
    /// Quick reads: slotted articles (indices 3-5) followed by related
    /// links discovered for the main article.
    pub quick_reads: Vec<RelatedLink>,
    /// Recommended reads: slotted articles (indices 6+) followed by related
    /// links discovered for every non-main article.
    pub recommended_reads: Vec<RelatedLink>,
}
