//! Data models for news articles and their scored representations.
//!
//! This module defines the records passed between the candidate sources, the
//! analysis core, and the output writers:
//! - [`ArticleCandidate`]: an unscored `{title, summary, url, source, date}` tuple
//!   as produced by a scraper
//! - [`Article`]: the unit record enriched in place by sentiment scoring and
//!   topic extraction
//! - [`SentimentLabel`]: the three-way polarity label
//!
//! The serialized form of [`Article`] carries exactly the fields `title`,
//! `summary`, `url`, `source`, `date`, `sentiment_label`, `sentiment_score`
//! and `topics`. It is the wire contract with any HTTP or storage boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Compound scores at or above this value lean positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this value lean negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Three-way sentiment label.
///
/// Deserialization is lenient: any string other than the three known labels
/// becomes [`SentimentLabel::Neutral`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// All labels in reporting order.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    /// Apply the ±0.05 threshold rule to a compound score.
    ///
    /// `score >= 0.05` is positive, `score <= -0.05` is negative, anything in
    /// between is neutral.
    pub fn from_score(score: f64) -> Self {
        if score >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Parse a known label exactly; returns `None` for anything else.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "positive" => Some(SentimentLabel::Positive),
            "neutral" => Some(SentimentLabel::Neutral),
            "negative" => Some(SentimentLabel::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl From<String> for SentimentLabel {
    fn from(value: String) -> Self {
        SentimentLabel::parse(&value).unwrap_or_else(|| {
            warn!(label = %value, "Unrecognized sentiment label; folding into neutral");
            SentimentLabel::Neutral
        })
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw search result as handed over by a candidate source.
///
/// Becomes exactly one unscored [`Article`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleCandidate {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// A news article with metadata and, once enriched, sentiment and topics.
///
/// `sentiment_label` and `sentiment_score` are `None` until the article has
/// been scored; when set they agree under [`SentimentLabel::from_score`]
/// (pre-labeled fallback articles are accepted as given). `topics` is empty
/// until extraction and is ordered by descending salience.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub sentiment_label: Option<SentimentLabel>,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
        date: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            url: url.into(),
            source: source.into(),
            date,
            sentiment_label: None,
            sentiment_score: None,
            topics: Vec::new(),
        }
    }

    /// True once both the label and the score are set.
    pub fn is_scored(&self) -> bool {
        self.sentiment_label.is_some() && self.sentiment_score.is_some()
    }

    /// The text fed to the scorer and the topic extractor: title, one space,
    /// summary.
    pub fn analysis_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }
}

impl From<ArticleCandidate> for Article {
    fn from(candidate: ArticleCandidate) -> Self {
        Article::new(
            candidate.title,
            candidate.summary,
            candidate.url,
            candidate.source,
            candidate.date,
        )
    }
}

impl AsRef<Article> for Article {
    fn as_ref(&self) -> &Article {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scored(label: SentimentLabel, score: f64) -> Article {
        let mut article = Article::new(
            "Acme Beats Estimates",
            "Revenue rose sharply.",
            "https://www.reuters.com/business/acme",
            "Reuters",
            Some("Mar 02, 2025".to_string()),
        );
        article.sentiment_label = Some(label);
        article.sentiment_score = Some(score);
        article.topics = vec!["revenue".to_string(), "estimates".to_string()];
        article
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(SentimentLabel::from_score(0.05), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(-0.05), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.0499), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.0501), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(-0.0499), SentimentLabel::Neutral);
    }

    #[test]
    fn test_article_serializes_wire_fields_only() {
        let article = scored(SentimentLabel::Positive, 0.61);
        let value = serde_json::to_value(&article).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "date",
                "sentiment_label",
                "sentiment_score",
                "source",
                "summary",
                "title",
                "topics",
                "url"
            ]
        );
        assert_eq!(value["sentiment_label"], "positive");
    }

    #[test]
    fn test_article_round_trip() {
        let article = scored(SentimentLabel::Negative, -0.42);
        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);
    }

    #[test]
    fn test_unscored_article_deserializes_with_nulls() {
        let json = r#"{
            "title": "Acme Opens Plant",
            "summary": "A new facility.",
            "url": "https://example.com/a",
            "source": "Example",
            "date": null,
            "sentiment_label": null,
            "sentiment_score": null,
            "topics": []
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(!article.is_scored());
        assert!(article.topics.is_empty());
    }

    #[test]
    fn test_unknown_label_folds_into_neutral() {
        let json = r#"{
            "title": "t", "summary": "s", "url": "u", "source": "x",
            "sentiment_label": "mixed", "sentiment_score": 0.0, "topics": []
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.sentiment_label, Some(SentimentLabel::Neutral));
    }

    #[test]
    fn test_analysis_text_is_title_then_summary() {
        let article = Article::new("Title", "Summary text", "u", "s", None);
        assert_eq!(article.analysis_text(), "Title Summary text");
    }

    #[test]
    fn test_candidate_becomes_unscored_article() {
        let candidate = ArticleCandidate {
            title: "Acme".to_string(),
            summary: "Summary".to_string(),
            url: "https://example.com".to_string(),
            source: "Example".to_string(),
            date: None,
        };
        let article = Article::from(candidate);
        assert_eq!(article.sentiment_label, None);
        assert_eq!(article.sentiment_score, None);
        assert!(article.topics.is_empty());
    }
}
