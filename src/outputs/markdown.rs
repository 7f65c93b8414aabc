//! Markdown rendering of the digest.

use std::fmt::Write;

use crate::digest::heading;
use crate::models::{Digest, DigestEntry, RelatedLink};

/// Render the whole digest as one Markdown document.
pub fn render(digest: &Digest) -> String {
    let mut md = String::new();

    writeln!(md, "# {}\n", heading(digest)).unwrap();
    writeln!(md, "{}\n", digest.intro).unwrap();

    if let Some(main) = &digest.main {
        writeln!(md, "## Top Story: {}\n", main.content.title).unwrap();
        write_story(&mut md, main);
    }

    if !digest.other.is_empty() {
        writeln!(md, "## Other Stories\n").unwrap();
        for entry in &digest.other {
            writeln!(md, "### {}\n", entry.content.title).unwrap();
            write_story(&mut md, entry);
        }
    }

    if !digest.quick_reads.is_empty() {
        writeln!(md, "## Quick Reads\n").unwrap();
        write_link_list(&mut md, &digest.quick_reads);
    }

    if !digest.recommended_reads.is_empty() {
        writeln!(md, "## Recommended Reads\n").unwrap();
        write_link_list(&mut md, &digest.recommended_reads);
    }

    md
}

fn write_story(md: &mut String, entry: &DigestEntry) {
    if let Some(image) = &entry.content.image_url {
        writeln!(md, "![{}]({})\n", entry.content.title, image).unwrap();
    }
    writeln!(md, "{}\n", entry.summary.text).unwrap();
    writeln!(md, "[Read the full story]({})\n", entry.source.url).unwrap();
}

fn write_link_list(md: &mut String, links: &[RelatedLink]) {
    for link in links {
        writeln!(md, "- [{}]({})", link.title, link.url).unwrap();
    }
    md.push('\n');
}
