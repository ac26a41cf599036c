//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The configuration file path may also come from the environment.

use clap::Parser;

use crate::analysis::query::{ALL, ArticleQuery};

/// Command-line arguments for one analysis run.
///
/// # Examples
///
/// ```sh
/// # Analyze ten articles about a company
/// awful_news_sentiment -c "Acme" -j ./json -m ./markdown
///
/// # Offline, with a query over the results
/// awful_news_sentiment -c "Acme" -j ./json -m ./markdown --offline --query "growth" --sentiment positive
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Company to analyze
    #[arg(short, long)]
    pub company: String,

    /// Number of articles to analyze
    #[arg(short, long, default_value_t = 10)]
    pub num_articles: usize,

    /// Output directory for the JSON files
    #[arg(short, long)]
    pub json_output_dir: String,

    /// Output directory for the Markdown report, narrative, and index
    #[arg(short, long)]
    pub markdown_output_dir: String,

    /// Optional path to config.yaml file
    #[arg(long, env = "NEWS_SENTIMENT_CONFIG")]
    pub config: Option<String>,

    /// Skip live retrieval and use generated articles only
    #[arg(long)]
    pub offline: bool,

    /// Free-text query over the analyzed articles
    #[arg(long)]
    pub query: Option<String>,

    /// Keep only articles with this sentiment label
    #[arg(long, default_value = ALL, value_parser = ["all", "positive", "neutral", "negative"])]
    pub sentiment: String,

    /// Keep only articles tagged with this topic
    #[arg(long, default_value = ALL)]
    pub topic: String,
}

impl Cli {
    /// The query options as one [`ArticleQuery`].
    pub fn article_query(&self) -> ArticleQuery {
        ArticleQuery {
            text: self.query.clone().unwrap_or_default(),
            sentiment: self.sentiment.clone(),
            topic: self.topic.clone(),
        }
    }
}
