//! Google News RSS search backend.
//!
//! Google News exposes a query endpoint that returns standard RSS 2.0.
//! Restricting results to the article's own site is done with a `site:`
//! operator in the query. Item titles carry a trailing " - Source"
//! attribution that is stripped before rendering.

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, info, instrument};

use super::{FinderError, RelatedLinkFinder};
use crate::models::RelatedLink;

const GOOGLE_NEWS_RSS: &str = "https://news.google.com/rss/search";

/// Related-link finder backed by Google News RSS search.
#[derive(Debug, Clone)]
pub struct GoogleNewsFinder {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleNewsFinder {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: GOOGLE_NEWS_RSS.to_string(),
        }
    }
}

impl RelatedLinkFinder for GoogleNewsFinder {
    #[instrument(level = "info", skip(self))]
    async fn find(
        &self,
        query: &str,
        domain: &str,
        limit: usize,
    ) -> Result<Vec<RelatedLink>, FinderError> {
        let full_query = if domain.is_empty() {
            query.to_string()
        } else {
            format!("{query} site:{domain}")
        };
        let url = format!(
            "{}?q={}&hl=en-US&gl=US&ceid=US:en",
            self.base_url,
            urlencoding::encode(&full_query)
        );
        debug!(%url, "Fetching Google News RSS");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FinderError::Status(status));
        }

        let xml = resp.text().await?;
        let mut links = parse_rss_items(&xml)?;
        links.truncate(limit);
        info!(count = links.len(), "Google News search completed");
        Ok(links)
    }
}

/// Parse `<item><title>/<link>` pairs out of an RSS 2.0 document.
pub(crate) fn parse_rss_items(xml: &str) -> Result<Vec<RelatedLink>, FinderError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    #[derive(PartialEq)]
    enum Field {
        Title,
        Link,
        Other,
    }

    let mut links = Vec::new();
    let mut in_item = false;
    let mut field = Field::Other;
    let mut title = String::new();
    let mut link = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => {
                    in_item = true;
                    title.clear();
                    link.clear();
                }
                b"title" if in_item => field = Field::Title,
                b"link" if in_item => field = Field::Link,
                _ => field = Field::Other,
            },
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" {
                    in_item = false;
                    if !link.is_empty() {
                        let display = if title.is_empty() {
                            link.clone()
                        } else {
                            strip_source_suffix(&title)
                        };
                        links.push(RelatedLink {
                            title: display,
                            url: link.clone(),
                        });
                    }
                }
                field = Field::Other;
            }
            Ok(Event::Text(t)) if in_item => {
                let text = t
                    .xml_content()
                    .map_err(|e| FinderError::Parse(e.to_string()))?;
                match field {
                    Field::Title => title.push_str(&text),
                    Field::Link => link.push_str(&text),
                    Field::Other => {}
                }
            }
            // Entity and character references arrive as their own events.
            Ok(Event::GeneralRef(r)) if in_item => {
                let ch = match r
                    .resolve_char_ref()
                    .map_err(|e| FinderError::Parse(e.to_string()))?
                {
                    Some(ch) => ch,
                    None => match r.as_ref() {
                        b"amp" => '&',
                        b"lt" => '<',
                        b"gt" => '>',
                        b"quot" => '"',
                        b"apos" => '\'',
                        other => {
                            return Err(FinderError::Parse(format!(
                                "unknown entity reference: {}",
                                String::from_utf8_lossy(other)
                            )));
                        }
                    },
                };
                match field {
                    Field::Title => title.push(ch),
                    Field::Link => link.push(ch),
                    Field::Other => {}
                }
            }
            Ok(Event::CData(t)) if in_item => {
                let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                match field {
                    Field::Title => title.push_str(&text),
                    Field::Link => link.push_str(&text),
                    Field::Other => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FinderError::Parse(e.to_string())),
            _ => {}
        }
    }

    Ok(links)
}

/// Strip the " - Source Name" attribution Google News appends to titles.
fn strip_source_suffix(title: &str) -> String {
    match title.rfind(" - ") {
        Some(pos) => title[..pos].trim().to_string(),
        None => title.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"budget vote" site:a.example - Google News</title>
    <item>
      <title>Council passes budget - The A Example</title>
      <link>https://a.example/budget-vote</link>
    </item>
    <item>
      <title><![CDATA[Mayor reacts to vote - The A Example]]></title>
      <link>https://a.example/mayor-reacts</link>
    </item>
    <item>
      <title>No link here</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_rss_items() {
        let links = parse_rss_items(FEED).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].title, "Council passes budget");
        assert_eq!(links[0].url, "https://a.example/budget-vote");
        assert_eq!(links[1].title, "Mayor reacts to vote");
    }

    #[test]
    fn test_channel_title_is_not_an_item() {
        let links = parse_rss_items(FEED).unwrap();
        assert!(links.iter().all(|l| !l.title.contains("Google News")));
    }

    #[test]
    fn test_strip_source_suffix() {
        assert_eq!(
            strip_source_suffix("Bitcoin surges past $100k - CoinDesk"),
            "Bitcoin surges past $100k"
        );
        assert_eq!(strip_source_suffix("No suffix"), "No suffix");
    }

    #[test]
    fn test_entity_refs_decode_inside_items() {
        let feed = "<rss><channel><item>\
            <title>Q&amp;A&#x2014;live - The A Example</title>\
            <link>https://a.example/qa?x=1&amp;y=2</link>\
            </item></channel></rss>";
        let links = parse_rss_items(feed).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Q&A\u{2014}live");
        assert_eq!(links[0].url, "https://a.example/qa?x=1&y=2");
    }

    #[test]
    fn test_bad_entity_is_a_parse_error() {
        let feed = "<rss><channel><item><title>&#xZZ;</title><link>u</link></item></channel></rss>";
        let result = parse_rss_items(feed);
        assert!(matches!(result, Err(FinderError::Parse(_))));
    }
}
