//! Cross-article aggregation.
//!
//! [`ComparativeAnalyzer`] turns a set of scored articles into a
//! [`ComparativeAnalysisResult`]: the label distribution, the average score,
//! the most positive and most negative articles, the most common topics, and
//! per-topic sentiment.
//!
//! Aggregation does not score articles. Every input article must already
//! carry a label and a finite score; [`ComparativeAnalyzer::try_aggregate`]
//! rejects anything else, and [`ComparativeAnalyzer::aggregate`] replaces the
//! failure with a placeholder result.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::{error, instrument};

use crate::error::{NewsError, Result};
use crate::models::{Article, SentimentLabel};
use crate::utils::round_to;

/// Most common topics reported.
pub const MAX_COMMON_TOPICS: usize = 10;

/// Overall tone of a result, or the marker for an empty input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallSentiment {
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "negative")]
    Negative,
    #[serde(rename = "No data")]
    NoData,
}

impl OverallSentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallSentiment::Positive => "positive",
            OverallSentiment::Neutral => "neutral",
            OverallSentiment::Negative => "negative",
            OverallSentiment::NoData => "No data",
        }
    }
}

impl From<SentimentLabel> for OverallSentiment {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Positive => OverallSentiment::Positive,
            SentimentLabel::Neutral => OverallSentiment::Neutral,
            SentimentLabel::Negative => OverallSentiment::Negative,
        }
    }
}

impl fmt::Display for OverallSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percentage of articles per label, each rounded to one decimal.
///
/// Rounding is per bucket, so the three values may not add up to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentDistribution {
    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    pub fn total(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }
}

/// Sentiment of the articles mentioning one topic.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TopicSentiment {
    pub count: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Mean score of the mentioning articles, rounded to two decimals.
    pub avg_score: f64,
}

/// Topic → [`TopicSentiment`], iterated in the order topics were first seen.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopicSentimentMap {
    entries: Vec<(String, TopicSentiment)>,
}

impl TopicSentimentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, topic: &str) -> Option<&TopicSentiment> {
        self.entries.iter().find(|(t, _)| t == topic).map(|(_, s)| s)
    }

    /// Insert or replace; a new topic goes to the end.
    pub fn insert(&mut self, topic: String, stats: TopicSentiment) {
        match self.entries.iter_mut().find(|(t, _)| *t == topic) {
            Some((_, existing)) => *existing = stats,
            None => self.entries.push((topic, stats)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TopicSentiment)> {
        self.entries.iter().map(|(t, s)| (t.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, TopicSentiment)> for TopicSentimentMap {
    fn from_iter<I: IntoIterator<Item = (String, TopicSentiment)>>(iter: I) -> Self {
        let mut map = TopicSentimentMap::new();
        for (topic, stats) in iter {
            map.insert(topic, stats);
        }
        map
    }
}

impl Serialize for TopicSentimentMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (topic, stats) in &self.entries {
            map.serialize_entry(topic, stats)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TopicSentimentMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = TopicSentimentMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of topic to topic sentiment")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut map = TopicSentimentMap::new();
                while let Some((topic, stats)) = access.next_entry::<String, TopicSentiment>()? {
                    map.insert(topic, stats);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Aggregate statistics over one article set. Produced fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeAnalysisResult {
    pub overall_sentiment: OverallSentiment,
    pub sentiment_distribution: SentimentDistribution,
    /// Mean score, rounded to two decimals.
    pub average_score: f64,
    pub most_positive: Option<Article>,
    pub most_negative: Option<Article>,
    /// Up to ten topics, most frequent first.
    pub common_topics: Vec<String>,
    pub topic_sentiment: TopicSentimentMap,
}

impl ComparativeAnalysisResult {
    /// The result for an empty article set.
    pub fn no_data() -> Self {
        Self {
            overall_sentiment: OverallSentiment::NoData,
            sentiment_distribution: SentimentDistribution::default(),
            average_score: 0.0,
            most_positive: None,
            most_negative: None,
            common_topics: Vec::new(),
            topic_sentiment: TopicSentimentMap::new(),
        }
    }

    /// Placeholder returned when aggregation fails: a uniform distribution,
    /// zero average, and the first and last articles (in input order) as
    /// superlatives.
    pub fn degraded(articles: &[Article]) -> Self {
        Self {
            overall_sentiment: OverallSentiment::Neutral,
            sentiment_distribution: SentimentDistribution {
                positive: 33.3,
                neutral: 33.3,
                negative: 33.3,
            },
            average_score: 0.0,
            most_positive: articles.first().cloned(),
            most_negative: articles.last().cloned(),
            common_topics: Vec::new(),
            topic_sentiment: TopicSentimentMap::new(),
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.overall_sentiment == OverallSentiment::NoData
    }
}

/// Running totals for one topic during aggregation.
#[derive(Default)]
struct TopicTally {
    count: usize,
    positive: usize,
    neutral: usize,
    negative: usize,
    score_sum: f64,
}

impl TopicTally {
    fn finish(&self) -> TopicSentiment {
        let avg = if self.count > 0 {
            round_to(self.score_sum / self.count as f64, 2)
        } else {
            0.0
        };
        TopicSentiment {
            count: self.count,
            positive: self.positive,
            neutral: self.neutral,
            negative: self.negative,
            avg_score: avg,
        }
    }
}

/// Stateless aggregator; cheap to construct and safe to share.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparativeAnalyzer;

impl ComparativeAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate `articles`, rejecting any article that is unscored or has a
    /// non-finite score.
    ///
    /// # Returns
    ///
    /// [`ComparativeAnalysisResult::no_data`] for an empty slice, otherwise the
    /// full aggregate.
    ///
    /// # Errors
    ///
    /// [`NewsError::UnscoredArticle`] or [`NewsError::NonFiniteScore`] naming
    /// the first offending article.
    pub fn try_aggregate(&self, articles: &[Article]) -> Result<ComparativeAnalysisResult> {
        if articles.is_empty() {
            return Ok(ComparativeAnalysisResult::no_data());
        }

        let mut scored: Vec<(&Article, SentimentLabel, f64)> = Vec::with_capacity(articles.len());
        for (index, article) in articles.iter().enumerate() {
            match (article.sentiment_label, article.sentiment_score) {
                (Some(label), Some(score)) if score.is_finite() => scored.push((article, label, score)),
                (Some(_), Some(_)) => {
                    return Err(NewsError::NonFiniteScore {
                        index,
                        title: article.title.clone(),
                    });
                }
                _ => {
                    return Err(NewsError::UnscoredArticle {
                        index,
                        title: article.title.clone(),
                    });
                }
            }
        }

        let total = scored.len() as f64;

        let mut counts: HashMap<SentimentLabel, usize> = HashMap::new();
        for (_, label, _) in &scored {
            *counts.entry(*label).or_insert(0) += 1;
        }
        let pct = |label: SentimentLabel| {
            round_to(100.0 * *counts.get(&label).unwrap_or(&0) as f64 / total, 1)
        };
        let sentiment_distribution = SentimentDistribution {
            positive: pct(SentimentLabel::Positive),
            neutral: pct(SentimentLabel::Neutral),
            negative: pct(SentimentLabel::Negative),
        };

        let average_score = round_to(scored.iter().map(|(_, _, s)| s).sum::<f64>() / total, 2);

        // stable: ties keep input order
        let mut by_score = scored.clone();
        by_score.sort_by(|a, b| a.2.total_cmp(&b.2));
        let most_negative = by_score.first().map(|(a, _, _)| (*a).clone());
        let most_positive = by_score.last().map(|(a, _, _)| (*a).clone());

        let overall_sentiment = SentimentLabel::from_score(average_score).into();

        let mut topic_order: Vec<String> = Vec::new();
        let mut tallies: HashMap<String, TopicTally> = HashMap::new();
        for (article, label, score) in &scored {
            for topic in &article.topics {
                let tally = tallies.entry(topic.clone()).or_insert_with(|| {
                    topic_order.push(topic.clone());
                    TopicTally::default()
                });
                tally.count += 1;
                tally.score_sum += score;
                match label {
                    SentimentLabel::Positive => tally.positive += 1,
                    SentimentLabel::Neutral => tally.neutral += 1,
                    SentimentLabel::Negative => tally.negative += 1,
                }
            }
        }

        let topic_sentiment: TopicSentimentMap = topic_order
            .iter()
            .map(|topic| (topic.clone(), tallies[topic].finish()))
            .collect();

        let mut ranked: Vec<(&str, usize)> = topic_sentiment.iter().map(|(t, s)| (t, s.count)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let common_topics = ranked
            .into_iter()
            .take(MAX_COMMON_TOPICS)
            .map(|(t, _)| t.to_string())
            .collect();

        Ok(ComparativeAnalysisResult {
            overall_sentiment,
            sentiment_distribution,
            average_score,
            most_positive,
            most_negative,
            common_topics,
            topic_sentiment,
        })
    }

    /// Aggregate `articles`; any failure is logged and replaced with
    /// [`ComparativeAnalysisResult::degraded`].
    #[instrument(level = "info", skip_all, fields(count = articles.len()))]
    pub fn aggregate(&self, articles: &[Article]) -> ComparativeAnalysisResult {
        self.try_aggregate(articles).unwrap_or_else(|e| {
            error!(error = %e, "Error generating comparative analysis; returning placeholder");
            ComparativeAnalysisResult::degraded(articles)
        })
    }
}
