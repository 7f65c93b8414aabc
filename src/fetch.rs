//! Article fetching and content extraction.
//!
//! One outbound GET per article. Extraction uses fixed heuristics: the
//! `<title>` tag (falling back to the first `<h1>`, then the URL), the
//! space-joined `<p>` texts for the body, and `og:image`/`twitter:image`
//! meta tags for a representative image.
//!
//! The fetcher never raises past its boundary: every failure (network,
//! timeout, non-200, missing elements) is logged and converted into
//! fallback content. Callers must treat an empty body as a valid result.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::models::ArticleContent;

/// User-Agent string identifying this tool.
const USER_AGENT: &str = concat!("news_digest/", env!("CARGO_PKG_VERSION"));

static TITLE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static H1_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static P_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static OG_IMAGE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());
static TW_IMAGE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="twitter:image"]"#).unwrap());

/// Build the shared HTTP client with a fixed per-request timeout.
///
/// The same deadline applies uniformly to every network call in a run.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Fetch one article and extract its content.
///
/// Never errors: any failure produces [`ArticleContent::fallback`] with the
/// URL as title and an empty body.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_article(client: &reqwest::Client, url: &str, body_cap: usize) -> ArticleContent {
    let html = match client.get(url).send().await {
        Ok(resp) => {
            let status = resp.status();
            if !status.is_success() {
                warn!(%status, "Fetch returned non-success status; using fallback content");
                return ArticleContent::fallback(url);
            }
            match resp.text().await {
                Ok(html) => html,
                Err(e) => {
                    warn!(error = %e, "Failed to read response body; using fallback content");
                    return ArticleContent::fallback(url);
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "Fetch failed; using fallback content");
            return ArticleContent::fallback(url);
        }
    };

    let content = extract_content(url, &html, body_cap);
    debug!(
        title = %content.title,
        body_bytes = content.body.len(),
        has_image = content.image_url.is_some(),
        "Extracted article content"
    );
    content
}

/// Extract title, body, and image from raw HTML.
///
/// Pure with respect to I/O so it can run against fixtures.
pub fn extract_content(url: &str, html: &str, body_cap: usize) -> ArticleContent {
    let document = Html::parse_document(html);

    let title = extract_title(&document).unwrap_or_else(|| url.to_string());
    let body = truncate_chars(&extract_body(&document), body_cap);
    let image_url = extract_image(&document, url);

    ArticleContent {
        title,
        body,
        image_url,
    }
}

fn extract_title(document: &Html) -> Option<String> {
    for selector in [&*TITLE_SEL, &*H1_SEL] {
        if let Some(element) = document.select(selector).next() {
            let text: String = element.text().collect::<Vec<_>>().join(" ");
            let trimmed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
    }
    None
}

/// Space-joined paragraph texts, whitespace-normalized per paragraph.
fn extract_body(document: &Html) -> String {
    let mut paragraphs = Vec::new();
    for element in document.select(&P_SEL) {
        let text = element.text().collect::<Vec<_>>().join(" ");
        let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !cleaned.is_empty() {
            paragraphs.push(cleaned);
        }
    }
    paragraphs.join(" ")
}

fn extract_image(document: &Html, page_url: &str) -> Option<String> {
    let raw = [&*OG_IMAGE_SEL, &*TW_IMAGE_SEL].into_iter().find_map(|sel| {
        document
            .select(sel)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(str::to_string)
    })?;

    // Resolve relative image URLs against the page.
    match Url::parse(&raw) {
        Ok(_) => Some(raw),
        Err(_) => Url::parse(page_url)
            .ok()?
            .join(&raw)
            .ok()
            .map(|u| u.to_string()),
    }
}

/// Truncate to at most `cap` characters on a char boundary.
fn truncate_chars(s: &str, cap: usize) -> String {
    match s.char_indices().nth(cap) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
