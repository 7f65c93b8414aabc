//! # News Digest
//!
//! A newsletter-digest pipeline: take a list of article URLs, fetch each
//! page's HTML, extract title/body/image, summarize the text through an
//! OpenAI-compatible chat API, look up related links per article, and
//! assemble everything into a single digest rendered as Markdown, HTML,
//! and JSON.
//!
//! ## Pipeline
//!
//! 1. **Fetch**: download and extract article content ([`fetch`])
//! 2. **Keywords**: derive a search query from the title ([`keywords`])
//! 3. **Related links**: query a search backend per article ([`related`])
//! 4. **Summarize**: send body text to the LLM ([`api`])
//! 5. **Assemble**: slot articles into digest sections ([`digest`])
//!
//! Processing is strictly sequential, one URL at a time, in input order.
//! Every failure downstream of input validation degrades to a visible
//! placeholder instead of aborting the run.

pub mod api;
pub mod cli;
pub mod config;
pub mod digest;
pub mod fetch;
pub mod keywords;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod related;
pub mod utils;

pub use api::{ChatClient, SummaryStyle, TextGenerator, SUMMARY_UNAVAILABLE};
pub use models::{ArticleContent, ArticleRef, Digest, DigestEntry, RelatedLink, SectionKind, Summary};
pub use pipeline::{run_digest, ArticleFetcher, DigestError, DigestOptions};
