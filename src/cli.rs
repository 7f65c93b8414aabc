//! Command-line interface definitions.

use clap::Parser;

/// Command-line arguments for the digest builder.
///
/// # Examples
///
/// ```sh
/// # URLs from a file, outputs into ./digests
/// news_digest -i urls.txt -o ./digests
///
/// # URLs from stdin
/// printf 'https://a.example/1\n' | news_digest -o ./digests
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// File with article URLs, one per line (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output directory for the rendered digest files
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Optional path to config.yaml
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Split a text block into URLs: one per line, blank lines ignored.
pub fn parse_url_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
