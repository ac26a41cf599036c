//! Error types shared across the analysis core, the candidate sources, and the
//! output writers.
//!
//! Component boundaries that have a defined fallback value (sentiment scoring,
//! aggregation, summary rendering) expose both a `try_*` form returning
//! [`Result`] and an infallible form that logs and substitutes the fallback.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    /// The caller did not name a company to analyze.
    #[error("company name is required")]
    MissingCompanyName,

    /// Neither live retrieval nor the caller supplied any article.
    #[error("no articles found")]
    NoArticles,

    /// An article reached aggregation without a label or score.
    #[error("article {index} ('{title}') has not been scored")]
    UnscoredArticle { index: usize, title: String },

    /// An article carries a NaN or infinite sentiment score.
    #[error("article {index} ('{title}') has a non-finite sentiment score")]
    NonFiniteScore { index: usize, title: String },

    /// The lexicon model failed while scoring.
    #[error("sentiment model error: {0}")]
    SentimentModel(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("gave up on {url} after {attempts} attempts")]
    RetriesExhausted { url: String, attempts: usize },

    #[error("feed parse error: {0}")]
    Feed(#[from] quick_xml::DeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("render error: {0}")]
    Render(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, NewsError>;
