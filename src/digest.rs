//! Digest assembly.
//!
//! Arranges ordered per-article results into the four digest sections
//! using the canonical slotting rule (index 0 main, 1-2 other stories,
//! 3-5 quick reads, 6+ recommended reads). Articles that failed to fetch
//! or summarize still occupy their slot, rendered with placeholder text.
//!
//! Discovered related links land after the slotted articles in their
//! section: the main article's same-domain links extend Quick Reads, and
//! every other article's links extend Recommended Reads.

use tracing::{info, instrument};

use crate::models::{Digest, DigestEntry, SectionKind};
use crate::utils::upcase;

/// Assemble the digest once, over all per-article results, in input order.
#[instrument(level = "info", skip_all, fields(entries = entries.len(), %local_date, %edition))]
pub fn assemble(entries: Vec<DigestEntry>, local_date: String, edition: String) -> Digest {
    let intro = format!(
        "Good {edition}! Here is your digest for {local_date}: {} {} fetched, summarized, and paired with further reading.",
        entries.len(),
        if entries.len() == 1 { "story" } else { "stories" },
    );

    // Related links are collected up front so slotted articles can lead
    // their sections.
    let mut quick_tail = Vec::new();
    let mut recommended_tail = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        if i == 0 {
            quick_tail.extend(entry.related.iter().cloned());
        } else {
            recommended_tail.extend(entry.related.iter().cloned());
        }
    }

    let mut main = None;
    let mut other = Vec::new();
    let mut quick_reads = Vec::new();
    let mut recommended_reads = Vec::new();

    for (i, entry) in entries.into_iter().enumerate() {
        match SectionKind::for_index(i) {
            SectionKind::Main => main = Some(entry),
            SectionKind::Other => other.push(entry),
            SectionKind::QuickRead => quick_reads.push(entry.as_link()),
            SectionKind::Recommended => recommended_reads.push(entry.as_link()),
        }
    }

    quick_reads.extend(quick_tail);
    recommended_reads.extend(recommended_tail);

    info!(
        other = other.len(),
        quick_reads = quick_reads.len(),
        recommended_reads = recommended_reads.len(),
        "Digest assembled"
    );

    Digest {
        local_date,
        edition,
        intro,
        main,
        other,
        quick_reads,
        recommended_reads,
    }
}

/// Heading line for the rendered digest.
pub fn heading(digest: &Digest) -> String {
    format!(
        "News Digest, {} Edition ({})",
        upcase(&digest.edition),
        digest.local_date
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleContent, ArticleRef, RelatedLink, Summary};

    fn entry(n: usize, related: Vec<RelatedLink>) -> DigestEntry {
        let url = format!("https://a.example/{n}");
        DigestEntry {
            source: ArticleRef::new(url.clone()),
            content: ArticleContent {
                title: format!("T{n}"),
                body: format!("body {n}"),
                image_url: None,
            },
            summary: Summary {
                text: format!("SUMMARY(T{n})"),
                source: ArticleRef::new(url),
            },
            related,
        }
    }

    fn link(n: &str) -> RelatedLink {
        RelatedLink {
            title: format!("R{n}"),
            url: format!("https://b.example/{n}"),
        }
    }

    #[test]
    fn test_three_articles_fill_main_and_other_only() {
        let entries = vec![entry(1, vec![]), entry(2, vec![]), entry(3, vec![])];
        let digest = assemble(entries, "2026-08-23".to_string(), "morning".to_string());

        assert_eq!(digest.main.as_ref().unwrap().content.title, "T1");
        let other: Vec<_> = digest.other.iter().map(|e| e.content.title.as_str()).collect();
        assert_eq!(other, vec!["T2", "T3"]);
        assert!(digest.quick_reads.is_empty());
        assert!(digest.recommended_reads.is_empty());
    }

    #[test]
    fn test_seven_articles_fill_all_sections() {
        let entries = (1..=7).map(|n| entry(n, vec![])).collect();
        let digest = assemble(entries, "2026-08-23".to_string(), "evening".to_string());

        assert!(digest.main.is_some());
        assert_eq!(digest.other.len(), 2);
        let quick: Vec<_> = digest.quick_reads.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(quick, vec!["T4", "T5", "T6"]);
        let rec: Vec<_> = digest
            .recommended_reads
            .iter()
            .map(|l| l.title.as_str())
            .collect();
        assert_eq!(rec, vec!["T7"]);
    }

    #[test]
    fn test_related_links_follow_slotted_articles() {
        let entries = vec![
            entry(1, vec![link("main-a")]),
            entry(2, vec![link("other-a")]),
            entry(3, vec![]),
            entry(4, vec![link("quick-a")]),
        ];
        let digest = assemble(entries, "2026-08-23".to_string(), "morning".to_string());

        // Main article's links extend quick reads, after the slotted T4.
        let quick: Vec<_> = digest.quick_reads.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(quick, vec!["T4", "Rmain-a"]);

        // Everyone else's links extend recommended reads.
        let rec: Vec<_> = digest
            .recommended_reads
            .iter()
            .map(|l| l.title.as_str())
            .collect();
        assert_eq!(rec, vec!["Rother-a", "Rquick-a"]);
    }

    #[test]
    fn test_intro_mentions_date_and_count() {
        let digest = assemble(
            vec![entry(1, vec![])],
            "2026-08-23".to_string(),
            "afternoon".to_string(),
        );
        assert!(digest.intro.contains("2026-08-23"));
        assert!(digest.intro.contains("1 story"));
    }

    #[test]
    fn test_heading() {
        let digest = assemble(vec![], "2026-08-23".to_string(), "morning".to_string());
        assert_eq!(heading(&digest), "News Digest, Morning Edition (2026-08-23)");
    }
}
