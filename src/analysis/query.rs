//! Relevance ranking and filtering over an article collection.
//!
//! Three independent filters that compose in a fixed order when chained:
//! free-text relevance, then sentiment label, then topic. None of them mutate
//! their input; the text query produces annotated copies.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Article;

/// Filter value that disables the sentiment and topic filters.
pub const ALL: &str = "all";

/// An article copy annotated with its relevance to a text query.
///
/// `relevance` is `None` when no text query was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedArticle {
    #[serde(flatten)]
    pub article: Article,
    #[serde(rename = "relevance_score", skip_serializing_if = "Option::is_none", default)]
    pub relevance: Option<usize>,
}

impl RankedArticle {
    pub fn unranked(article: Article) -> Self {
        Self {
            article,
            relevance: None,
        }
    }
}

impl AsRef<Article> for RankedArticle {
    fn as_ref(&self) -> &Article {
        &self.article
    }
}

/// The three filters of one query; empty or `"all"` values are no-ops.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleQuery {
    pub text: String,
    pub sentiment: String,
    pub topic: String,
}

impl ArticleQuery {
    /// True when every filter is a no-op.
    pub fn is_identity(&self) -> bool {
        self.text.trim().is_empty() && is_all(&self.sentiment) && is_all(&self.topic)
    }
}

fn is_all(value: &str) -> bool {
    value.is_empty() || value == ALL
}

/// Stateless query engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine;

impl QueryEngine {
    pub fn new() -> Self {
        Self
    }

    /// Number of non-overlapping occurrences of `term` in `haystack`.
    fn count_occurrences(haystack: &str, term: &str) -> usize {
        if term.is_empty() {
            return 0;
        }
        haystack.matches(term).count()
    }

    /// Rank articles by how often the query's terms occur in their title and
    /// summary.
    ///
    /// Articles with no occurrence are dropped; the rest are sorted by
    /// descending relevance, ties keeping input order. An empty query or an
    /// empty collection returns every article unranked, in input order.
    pub fn query_by_text<T: AsRef<Article>>(&self, articles: &[T], query_text: &str) -> Vec<RankedArticle> {
        let terms: Vec<String> = query_text.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() || articles.is_empty() {
            return articles
                .iter()
                .map(|a| RankedArticle::unranked(a.as_ref().clone()))
                .collect();
        }

        let mut results: Vec<RankedArticle> = articles
            .iter()
            .filter_map(|a| {
                let article = a.as_ref();
                let text = format!("{} {}", article.title, article.summary).to_lowercase();
                let relevance: usize = terms.iter().map(|t| Self::count_occurrences(&text, t)).sum();
                (relevance > 0).then(|| RankedArticle {
                    article: article.clone(),
                    relevance: Some(relevance),
                })
            })
            .collect();

        // stable: ties keep input order
        results.sort_by(|a, b| b.relevance.cmp(&a.relevance));
        debug!(query = %query_text, matched = results.len(), "Text query applied");
        results
    }

    /// Keep articles whose label is exactly `label`; `"all"` or empty keeps
    /// everything.
    pub fn filter_by_sentiment<T: AsRef<Article>>(&self, articles: Vec<T>, label: &str) -> Vec<T> {
        if is_all(label) {
            return articles;
        }
        articles
            .into_iter()
            .filter(|a| a.as_ref().sentiment_label.is_some_and(|l| l.as_str() == label))
            .collect()
    }

    /// Keep articles whose topic list contains `topic` as an element; `"all"`
    /// or empty keeps everything.
    pub fn filter_by_topic<T: AsRef<Article>>(&self, articles: Vec<T>, topic: &str) -> Vec<T> {
        if is_all(topic) {
            return articles;
        }
        articles
            .into_iter()
            .filter(|a| a.as_ref().topics.iter().any(|t| t == topic))
            .collect()
    }

    /// Apply text query, sentiment filter, and topic filter in that order.
    pub fn apply<T: AsRef<Article>>(&self, articles: &[T], query: &ArticleQuery) -> Vec<RankedArticle> {
        let ranked = self.query_by_text(articles, &query.text);
        let by_sentiment = self.filter_by_sentiment(ranked, &query.sentiment);
        let result = self.filter_by_topic(by_sentiment, &query.topic);
        debug!(input = articles.len(), output = result.len(), "Query applied");
        result
    }

    /// Distinct topics across `articles`, in first-seen order.
    pub fn available_topics<T: AsRef<Article>>(&self, articles: &[T]) -> Vec<String> {
        articles
            .iter()
            .flat_map(|a| a.as_ref().topics.iter())
            .unique()
            .cloned()
            .collect()
    }
}
