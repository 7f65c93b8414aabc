//! # News Digest
//!
//! Command-line entry point. Reads article URLs from a file or stdin,
//! runs the fetch/summarize/search pipeline sequentially over them, and
//! writes the assembled digest as Markdown, HTML, and JSON.
//!
//! ```sh
//! news_digest -i urls.txt -o ./digests
//! ```

use clap::Parser;
use std::error::Error;
use std::io::Read;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use news_digest::api::ChatClient;
use news_digest::cli::{parse_url_lines, Cli};
use news_digest::config::{Config, SearchProvider};
use news_digest::fetch::build_client;
use news_digest::models::Digest;
use news_digest::outputs::{html, json, markdown};
use news_digest::pipeline::{run_digest, DigestOptions, HttpFetcher};
use news_digest::related::google_news::GoogleNewsFinder;
use news_digest::related::llm::LlmFinder;
use news_digest::utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_digest starting up");

    let args = Cli::parse();
    debug!(?args.input, ?args.output_dir, "Parsed CLI arguments");

    let config = Config::load(args.config.as_deref())?;
    let api_key = config.api_key()?.to_string();

    // Early check: the output directory must be writable before any
    // network activity starts.
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(path = %args.output_dir, error = %e, "Output directory is not writable");
        return Err(e);
    }

    let urls = match &args.input {
        Some(path) => parse_url_lines(&std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            parse_url_lines(&text)
        }
    };
    info!(count = urls.len(), "Collected input URLs");

    let client = build_client(config.http.timeout_secs)?;
    let fetcher = HttpFetcher::new(client.clone(), config.digest.max_body_chars);
    let generator = ChatClient::new(
        client.clone(),
        &config.api.base_url,
        api_key,
        &config.api.model,
        &config.api.persona,
    );
    let options = DigestOptions {
        max_keywords: config.digest.max_keywords,
        max_related: config.search.max_related,
    };

    let digest = match config.search.provider {
        SearchProvider::GoogleNews => {
            let finder = GoogleNewsFinder::new(client.clone());
            run_digest(&fetcher, &generator, &finder, &urls, &options).await?
        }
        SearchProvider::Llm => {
            let finder = LlmFinder::new(
                generator.clone(),
                client.clone(),
                config.search.validate_links,
            );
            run_digest(&fetcher, &generator, &finder, &urls, &options).await?
        }
    };

    write_outputs(&digest, &args.output_dir).await;

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), "Execution complete");
    Ok(())
}

/// Write all three renditions. A failed write is logged and does not stop
/// the remaining outputs.
async fn write_outputs(digest: &Digest, output_dir: &str) {
    let stem = format!(
        "{}/{}_{}",
        output_dir.trim_end_matches('/'),
        digest.local_date,
        digest.edition
    );

    let md_path = format!("{stem}.md");
    if let Err(e) = tokio::fs::write(&md_path, markdown::render(digest)).await {
        error!(path = %md_path, error = %e, "Failed writing Markdown");
    } else {
        info!(path = %md_path, "Wrote digest Markdown");
    }

    let html_path = format!("{stem}.html");
    if let Err(e) = tokio::fs::write(&html_path, html::render(digest)).await {
        error!(path = %html_path, error = %e, "Failed writing HTML");
    } else {
        info!(path = %html_path, "Wrote digest HTML");
    }

    if let Err(e) = json::write_digest(digest, output_dir).await {
        error!(error = %e, "Failed writing JSON");
    }
}
