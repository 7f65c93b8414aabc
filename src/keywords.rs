//! Keyword extraction from article titles.
//!
//! Derives a short search query from a title by dropping stopwords and
//! short tokens, then ranking the survivors by length. Pure and
//! deterministic, no I/O.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Default number of keywords to keep.
pub const DEFAULT_MAX_KEYWORDS: usize = 4;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9']+").unwrap());

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "about", "above", "after", "again", "amid", "among", "been", "before",
        "being", "between", "could", "does", "down", "during", "each", "even",
        "every", "from", "have", "here", "how's", "into", "it's", "just",
        "more", "most", "much", "onto", "other", "over", "said", "says",
        "should", "since", "some", "such", "than", "that", "their", "them",
        "then", "there", "these", "they", "this", "those", "through", "under",
        "until", "upon", "very", "were", "what", "when", "where", "which",
        "while", "will", "with", "within", "would", "your",
    ]
    .into_iter()
    .collect()
});

/// Derive a space-joined keyword query from a title.
///
/// Tokenizes on word boundaries, lowercases, drops stopwords and tokens of
/// length 3 or less, stable-sorts the rest by descending length, and keeps
/// the first `max_keywords`.
///
/// If nothing survives filtering, falls back to the first `max_keywords`
/// raw tokens, lowercased. Callers must not assume the result carries
/// exactly `max_keywords` tokens.
pub fn extract_keywords(title: &str, max_keywords: usize) -> String {
    let tokens: Vec<String> = WORD_RE
        .find_iter(title)
        .map(|m| m.as_str().to_lowercase())
        .collect();

    let mut kept: Vec<String> = tokens
        .iter()
        .filter(|t| t.len() > 3 && !STOPWORDS.contains(t.as_str()))
        .cloned()
        .collect();

    if kept.is_empty() {
        return tokens
            .into_iter()
            .take(max_keywords)
            .collect::<Vec<_>>()
            .join(" ");
    }

    // Stable sort: equal-length tokens keep their title order.
    kept.sort_by(|a, b| b.len().cmp(&a.len()));
    kept.truncate(max_keywords);
    kept.join(" ")
}
