//! HTML rendering of the digest.
//!
//! Produces a standalone page with inline styling, suitable for pasting
//! into a mail client or serving as-is. All text is escaped, including
//! URLs placed in `href`/`src` attributes.

use std::fmt::Write;

use crate::digest::heading;
use crate::models::{Digest, DigestEntry, RelatedLink};

/// Escape text for safe embedding in HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the whole digest as one HTML document.
pub fn render(digest: &Digest) -> String {
    let mut html = String::new();
    let title = heading(digest);

    writeln!(html, "<!DOCTYPE html>").unwrap();
    writeln!(html, "<html lang=\"en\">").unwrap();
    writeln!(
        html,
        "<head><meta charset=\"utf-8\"><title>{}</title></head>",
        escape(&title)
    )
    .unwrap();
    writeln!(
        html,
        "<body style=\"font-family: Georgia, serif; max-width: 720px; margin: 0 auto; padding: 1em;\">"
    )
    .unwrap();

    writeln!(html, "<h1>{}</h1>", escape(&title)).unwrap();
    writeln!(html, "<p>{}</p>", escape(&digest.intro)).unwrap();

    if let Some(main) = &digest.main {
        writeln!(html, "<h2>Top Story: {}</h2>", escape(&main.content.title)).unwrap();
        write_story(&mut html, main);
    }

    if !digest.other.is_empty() {
        writeln!(html, "<h2>Other Stories</h2>").unwrap();
        for entry in &digest.other {
            writeln!(html, "<h3>{}</h3>", escape(&entry.content.title)).unwrap();
            write_story(&mut html, entry);
        }
    }

    if !digest.quick_reads.is_empty() {
        writeln!(html, "<h2>Quick Reads</h2>").unwrap();
        write_link_list(&mut html, &digest.quick_reads);
    }

    if !digest.recommended_reads.is_empty() {
        writeln!(html, "<h2>Recommended Reads</h2>").unwrap();
        write_link_list(&mut html, &digest.recommended_reads);
    }

    writeln!(html, "</body>").unwrap();
    writeln!(html, "</html>").unwrap();
    html
}

fn write_story(html: &mut String, entry: &DigestEntry) {
    if let Some(image) = &entry.content.image_url {
        writeln!(
            html,
            "<img src=\"{}\" alt=\"{}\" style=\"max-width: 100%;\">",
            escape(image),
            escape(&entry.content.title)
        )
        .unwrap();
    }
    writeln!(html, "<p>{}</p>", escape(&entry.summary.text)).unwrap();
    writeln!(
        html,
        "<p><a href=\"{}\">Read the full story</a></p>",
        escape(&entry.source.url)
    )
    .unwrap();
}

fn write_link_list(html: &mut String, links: &[RelatedLink]) {
    writeln!(html, "<ul>").unwrap();
    for link in links {
        writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape(&link.url),
            escape(&link.title)
        )
        .unwrap();
    }
    writeln!(html, "</ul>").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::assemble;
    use crate::models::{ArticleContent, ArticleRef, DigestEntry, Summary};

    fn entry(title: &str, summary: &str) -> DigestEntry {
        DigestEntry {
            source: ArticleRef::new("https://a.example/1"),
            content: ArticleContent {
                title: title.to_string(),
                body: String::new(),
                image_url: None,
            },
            summary: Summary {
                text: summary.to_string(),
                source: ArticleRef::new("https://a.example/1"),
            },
            related: vec![],
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom & Jerry"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_escapes_urls_in_attributes() {
        let mut e = entry("T1", "S1");
        e.content.image_url = Some(r#"https://a.example/i.png" onerror="x"#.to_string());
        e.source = ArticleRef::new(r#"https://a.example/1" class="x"#);
        e.related = vec![RelatedLink {
            title: "Fresh".to_string(),
            url: r#"https://b.example/f" rel="x"#.to_string(),
        }];
        let digest = assemble(vec![e], "2026-08-23".to_string(), "morning".to_string());
        let html = render(&digest);
        assert!(html.contains(r#"src="https://a.example/i.png&quot; onerror=&quot;x""#));
        assert!(html.contains(r#"href="https://a.example/1&quot; class=&quot;x""#));
        assert!(html.contains(r#"href="https://b.example/f&quot; rel=&quot;x""#));
        assert!(!html.contains(r#"onerror="x""#));
    }

    #[test]
    fn test_render_escapes_titles_and_summaries() {
        let digest = assemble(
            vec![entry("Cats & Dogs", "It's <great>.")],
            "2026-08-23".to_string(),
            "morning".to_string(),
        );
        let html = render(&digest);
        assert!(html.contains("Top Story: Cats &amp; Dogs"));
        assert!(html.contains("It's &lt;great&gt;."));
        assert!(html.contains("<a href=\"https://a.example/1\">Read the full story</a>"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
