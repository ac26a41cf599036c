//! Google News RSS search.
//!
//! Queries the public RSS search endpoint for `"<company> news"` and turns
//! each `<item>` into an [`ArticleCandidate`]. The feed is stable XML, so no
//! page-layout selectors are involved.
//!
//! # Feed Mapping
//!
//! | Candidate | RSS |
//! |-----------|-----|
//! | `title`   | `<title>`, minus the trailing `" - <source>"` |
//! | `summary` | `<description>` HTML flattened to text |
//! | `url`     | `<link>` |
//! | `source`  | `<source>` text |
//! | `date`    | `<pubDate>` (RFC 2822) as `"%b %d, %Y"` |

use chrono::DateTime;
use scraper::Html;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::AppConfig;
use crate::error::Result;
use crate::fetch::fetch_with_backoff;
use crate::models::ArticleCandidate;

const SEARCH_ENDPOINT: &str = "https://news.google.com/rss/search";

/// Titles this short or shorter are navigation noise, not headlines.
const MIN_TITLE_CHARS: usize = 5;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(rename = "pubDate", default)]
    pub_date: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    source: Option<Source>,
}

#[derive(Debug, Deserialize)]
struct Source {
    #[serde(rename = "$text", default)]
    name: String,
}

/// RSS search URL for news about `company` in the configured locale.
pub fn search_url(company: &str, config: &AppConfig) -> Result<Url> {
    let language = &config.feed.language;
    let region = &config.feed.region;
    let primary = language.split('-').next().unwrap_or(language);
    let url = format!(
        "{SEARCH_ENDPOINT}?q={}&hl={}&gl={}&ceid={}:{}",
        urlencoding::encode(&format!("{company} news")),
        urlencoding::encode(language),
        urlencoding::encode(region),
        urlencoding::encode(region),
        urlencoding::encode(primary),
    );
    Ok(Url::parse(&url)?)
}

/// Flatten an HTML snippet to whitespace-normalized text.
fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: Vec<&str> = fragment.root_element().text().collect();
    text.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `"Mon, 03 Mar 2025 14:00:00 GMT"` → `"Mar 03, 2025"`.
fn normalize_date(pub_date: &str) -> Option<String> {
    match DateTime::parse_from_rfc2822(pub_date.trim()) {
        Ok(dt) => Some(dt.format("%b %d, %Y").to_string()),
        Err(e) => {
            debug!(pub_date, error = %e, "Unparsable pubDate");
            None
        }
    }
}

fn strip_source_suffix(title: &str, source: &str) -> String {
    let title = title.trim();
    if source.is_empty() {
        return title.to_string();
    }
    title
        .strip_suffix(source)
        .and_then(|rest| rest.trim_end().strip_suffix('-'))
        .map(|rest| rest.trim_end().to_string())
        .filter(|rest| !rest.is_empty())
        .unwrap_or_else(|| title.to_string())
}

/// Parse an RSS document into candidates, skipping items without a usable
/// title.
///
/// # Arguments
///
/// * `xml` - A Google News RSS document.
///
/// # Returns
///
/// One candidate per item whose title is longer than 5 characters, with HTML
/// descriptions flattened and dates normalized.
pub fn parse_feed(xml: &str) -> Result<Vec<ArticleCandidate>> {
    let rss: Rss = quick_xml::de::from_str(xml)?;
    let total = rss.channel.items.len();

    let candidates: Vec<ArticleCandidate> = rss
        .channel
        .items
        .into_iter()
        .filter_map(|item| {
            let source = item
                .source
                .map(|s| s.name.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Unknown source".to_string());
            let title = strip_source_suffix(&item.title, &source);
            if title.chars().count() <= MIN_TITLE_CHARS {
                debug!(title = %title, "Skipping item with short title");
                return None;
            }
            let summary = item
                .description
                .as_deref()
                .map(html_to_text)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "No summary available".to_string());
            Some(ArticleCandidate {
                title,
                summary,
                url: item.link.trim().to_string(),
                source,
                date: item.pub_date.as_deref().and_then(normalize_date),
            })
        })
        .collect();

    if candidates.len() < total {
        warn!(kept = candidates.len(), total, "Dropped feed items");
    }
    Ok(candidates)
}

/// Search for up to `n` candidates about `company`.
#[instrument(level = "info", skip_all, fields(company = %company, n = n))]
pub async fn search(company: &str, n: usize, config: &AppConfig) -> Result<Vec<ArticleCandidate>> {
    let url = search_url(company, config)?;
    info!(%url, "Searching Google News");
    let xml = fetch_with_backoff(&config.fetch, url.as_str()).await?;
    let mut candidates = parse_feed(&xml)?;
    candidates.truncate(n);
    info!(count = candidates.len(), "Indexed Google News candidates");
    Ok(candidates)
}
