//! End-to-end pipeline scenarios with stubbed collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};

use news_digest::api::{GenerateError, TextGenerator, SUMMARY_UNAVAILABLE};
use news_digest::models::{ArticleContent, RelatedLink};
use news_digest::outputs::markdown;
use news_digest::pipeline::{run_digest, ArticleFetcher, DigestError, DigestOptions};
use news_digest::related::{FinderError, RelatedLinkFinder};

/// Fetcher that serves canned titles and counts its calls.
struct StubFetcher {
    calls: AtomicUsize,
}

impl StubFetcher {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl ArticleFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> ArticleContent {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // "https://a.example/3" -> "T3"
        let n = url.rsplit('/').next().unwrap_or("0");
        ArticleContent {
            title: format!("T{n}"),
            body: format!("body of T{n}"),
            image_url: None,
        }
    }
}

/// Generator that echoes the title embedded in the prompt.
struct EchoGenerator;

impl TextGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let title = prompt
            .lines()
            .find_map(|l| l.strip_prefix("Title: "))
            .unwrap_or("?");
        Ok(format!("SUMMARY({title})"))
    }
}

/// Generator that always fails.
struct FailingGenerator;

impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Err(GenerateError::Malformed("stub failure".to_string()))
    }
}

/// Finder that returns a fixed batch on every call and counts its calls.
struct CannedFinder {
    links: Vec<RelatedLink>,
    calls: AtomicUsize,
}

impl CannedFinder {
    fn empty() -> Self {
        Self {
            links: vec![],
            calls: AtomicUsize::new(0),
        }
    }

    fn with(links: Vec<RelatedLink>) -> Self {
        Self {
            links,
            calls: AtomicUsize::new(0),
        }
    }
}

impl RelatedLinkFinder for CannedFinder {
    async fn find(
        &self,
        _query: &str,
        _domain: &str,
        limit: usize,
    ) -> Result<Vec<RelatedLink>, FinderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut links = self.links.clone();
        links.truncate(limit);
        Ok(links)
    }
}

fn urls(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("https://a.example/{i}")).collect()
}

fn link(title: &str, url: &str) -> RelatedLink {
    RelatedLink {
        title: title.to_string(),
        url: url.to_string(),
    }
}

#[tokio::test]
async fn empty_input_fails_before_any_network_call() {
    let fetcher = StubFetcher::new();
    let finder = CannedFinder::empty();

    let result = run_digest(&fetcher, &EchoGenerator, &finder, &[], &DigestOptions::default()).await;
    assert!(matches!(result, Err(DigestError::NoUrls)));

    // Blank lines do not count as input either.
    let blanks = vec!["".to_string(), "   ".to_string()];
    let result =
        run_digest(&fetcher, &EchoGenerator, &finder, &blanks, &DigestOptions::default()).await;
    assert!(matches!(result, Err(DigestError::NoUrls)));

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    assert_eq!(finder.calls.load(Ordering::SeqCst), 0);

    let err = run_digest(&fetcher, &EchoGenerator, &finder, &[], &DigestOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "please enter at least one URL");
}

#[tokio::test]
async fn three_articles_slot_into_main_and_other_stories() {
    let fetcher = StubFetcher::new();
    let finder = CannedFinder::empty();

    let digest = run_digest(
        &fetcher,
        &EchoGenerator,
        &finder,
        &urls(3),
        &DigestOptions::default(),
    )
    .await
    .unwrap();

    let main = digest.main.as_ref().unwrap();
    assert_eq!(main.content.title, "T1");
    assert_eq!(main.summary.text, "SUMMARY(T1)");

    let other: Vec<_> = digest
        .other
        .iter()
        .map(|e| e.content.title.as_str())
        .collect();
    assert_eq!(other, vec!["T2", "T3"]);

    // Fewer than four articles: quick reads stays empty.
    assert!(digest.quick_reads.is_empty());
    assert!(digest.recommended_reads.is_empty());

    let md = markdown::render(&digest);
    assert!(md.contains("## Top Story: T1"));
    assert!(md.contains("SUMMARY(T2)"));
    assert!(md.contains("SUMMARY(T3)"));
    assert!(!md.contains("## Quick Reads"));

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
    assert_eq!(finder.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn failing_summarizer_still_fills_every_slot() {
    let fetcher = StubFetcher::new();
    let finder = CannedFinder::empty();

    let digest = run_digest(
        &fetcher,
        &FailingGenerator,
        &finder,
        &urls(7),
        &DigestOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(digest.main.as_ref().unwrap().summary.text, SUMMARY_UNAVAILABLE);
    for entry in &digest.other {
        assert_eq!(entry.summary.text, SUMMARY_UNAVAILABLE);
    }
    assert_eq!(digest.other.len(), 2);
    assert_eq!(digest.quick_reads.len(), 3);
    assert_eq!(digest.recommended_reads.len(), 1);

    // The run completes and renders all slots.
    let md = markdown::render(&digest);
    assert!(md.contains(SUMMARY_UNAVAILABLE));
    assert!(md.contains("## Quick Reads"));
    assert!(md.contains("## Recommended Reads"));
    assert!(md.contains("- [T7](https://a.example/7)"));
}

#[tokio::test]
async fn related_links_never_repeat_used_urls() {
    let fetcher = StubFetcher::new();
    // The first link collides with an input URL, the second is fresh. The
    // same batch comes back for every article, so the fresh link must be
    // claimed by the first article and excluded for the rest.
    let finder = CannedFinder::with(vec![
        link("collides with input", "https://a.example/2"),
        link("fresh", "https://b.example/fresh"),
    ]);

    let digest = run_digest(
        &fetcher,
        &EchoGenerator,
        &finder,
        &urls(3),
        &DigestOptions::default(),
    )
    .await
    .unwrap();

    let main = digest.main.as_ref().unwrap();
    assert_eq!(main.related.len(), 1);
    assert_eq!(main.related[0].url, "https://b.example/fresh");
    for entry in &digest.other {
        assert!(entry.related.is_empty());
    }

    // Main-article links land in quick reads; nothing repeats anywhere.
    let quick: Vec<_> = digest.quick_reads.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(quick, vec!["https://b.example/fresh"]);
    assert!(digest.recommended_reads.is_empty());
}
