//! # Awful News Sentiment
//!
//! Scores the sentiment of news coverage about a company and turns it into
//! comparative statistics, readable reports, chart-ready series, and a
//! speech-ready narrative.
//!
//! ## Features
//!
//! - Live candidate retrieval from the Google News RSS search, topped up with
//!   deterministic synthetic articles when retrieval comes up short
//! - Lexicon-based (VADER) sentiment scoring with a ±0.05 label threshold
//! - Frequency-ranked topic extraction over words and two-word phrases
//! - Cross-article aggregation: distribution, average, superlatives, and
//!   per-topic sentiment
//! - A detailed English report and a condensed Hindi narrative
//! - Relevance search and sentiment/topic filters over the analyzed set
//! - JSON and Markdown outputs with an append-only report index
//!
//! ## Architecture
//!
//! 1. **Collection** ([`scrapers`]): candidate tuples become [`Article`]s
//! 2. **Enrichment** ([`analysis::sentiment`], [`analysis::topics`])
//! 3. **Aggregation** ([`analysis::comparative`])
//! 4. **Narration** ([`summary`]) and **charting** ([`charts`])
//! 5. **Query** ([`analysis::query`]), on demand
//! 6. **Output** ([`outputs`])
//!
//! Steps 2 through 5 are synchronous and free of I/O; [`NewsAnalyzer`] wires them
//! together and is meant to be built once and shared.

pub mod analysis;
pub mod charts;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod summary;
pub mod utils;

pub use analysis::comparative::{ComparativeAnalysisResult, ComparativeAnalyzer, OverallSentiment};
pub use analysis::query::{ArticleQuery, QueryEngine, RankedArticle};
pub use analysis::sentiment::{SentimentScore, SentimentScorer};
pub use analysis::topics::TopicExtractor;
pub use analysis::{AnalysisReport, NewsAnalyzer};
pub use config::AppConfig;
pub use error::{NewsError, Result};
pub use models::{Article, ArticleCandidate, SentimentLabel};
pub use summary::SummaryComposer;
