//! Chart-ready data series for the visualization renderer.
//!
//! Nothing here draws; each function shapes part of an analysis into the
//! series a renderer plots. A series that is too thin to be worth drawing
//! comes back empty or `None`, and showing a "not enough data" placeholder is
//! the renderer's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::analysis::comparative::{ComparativeAnalysisResult, SentimentDistribution, TopicSentimentMap};
use crate::models::{Article, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD, SentimentLabel};
use crate::utils::round_to;

/// Bars in the topic chart.
pub const MAX_CHART_TOPICS: usize = 8;
/// Sources in the per-source breakdown.
pub const MAX_CHART_SOURCES: usize = 5;
/// Dated articles needed before a timeline is worth plotting.
pub const MIN_TIMELINE_POINTS: usize = 3;
/// Distinct sources needed before a per-source breakdown is worth plotting.
pub const MIN_SOURCES: usize = 2;

/// Date formats seen in feed and fallback articles, tried in order.
const DATE_FORMATS: [&str; 5] = ["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d", "%d %b %Y", "%d/%m/%Y"];

/// Bar color bucket for a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

impl Tone {
    pub fn of(avg_score: f64) -> Self {
        if avg_score > POSITIVE_THRESHOLD {
            Tone::Positive
        } else if avg_score < NEGATIVE_THRESHOLD {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicChartPoint {
    pub topic: String,
    pub avg_score: f64,
    pub count: usize,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// ISO date (`%Y-%m-%d`).
    pub date: String,
    pub title: String,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSentiment {
    pub source: String,
    pub articles: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Mean score of the source's articles, rounded to two decimals.
    pub avg_sentiment: f64,
}

/// Every series for one report, as written next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub sentiment_distribution: SentimentDistribution,
    pub topics: Vec<TopicChartPoint>,
    pub timeline: Option<Vec<TimelinePoint>>,
    pub sources: Option<Vec<SourceSentiment>>,
}

impl ChartData {
    pub fn build(result: &ComparativeAnalysisResult, articles: &[Article]) -> Self {
        Self {
            sentiment_distribution: result.sentiment_distribution,
            topics: topic_chart(&result.topic_sentiment),
            timeline: sentiment_timeline(articles),
            sources: source_sentiment(articles),
        }
    }
}

/// Up to eight topics by descending mention count; ties keep map order.
pub fn topic_chart(topic_sentiment: &TopicSentimentMap) -> Vec<TopicChartPoint> {
    let mut points: Vec<TopicChartPoint> = topic_sentiment
        .iter()
        .map(|(topic, stats)| TopicChartPoint {
            topic: topic.to_string(),
            avg_score: stats.avg_score,
            count: stats.count,
            tone: Tone::of(stats.avg_score),
        })
        .collect();
    points.sort_by(|a, b| b.count.cmp(&a.count));
    points.truncate(MAX_CHART_TOPICS);
    points
}

/// Parse an article date in any of the known formats.
pub fn parse_article_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
}

/// Scored, dated articles in date order.
///
/// Articles without a parsable date or without a score are skipped; fewer
/// than three remaining points yields `None`.
pub fn sentiment_timeline(articles: &[Article]) -> Option<Vec<TimelinePoint>> {
    let mut dated: Vec<(NaiveDate, &Article, SentimentLabel, f64)> = articles
        .iter()
        .filter_map(|a| {
            let date = parse_article_date(a.date.as_deref()?)?;
            Some((date, a, a.sentiment_label?, a.sentiment_score?))
        })
        .collect();

    if dated.len() < MIN_TIMELINE_POINTS {
        debug!(points = dated.len(), "Not enough dated articles for a timeline");
        return None;
    }
    dated.sort_by_key(|(date, ..)| *date);

    Some(
        dated
            .into_iter()
            .map(|(date, article, label, score)| TimelinePoint {
                date: date.format("%Y-%m-%d").to_string(),
                title: article.title.clone(),
                sentiment_score: score,
                sentiment_label: label,
            })
            .collect(),
    )
}

#[derive(Default)]
struct SourceTally {
    articles: usize,
    positive: usize,
    neutral: usize,
    negative: usize,
    score_sum: f64,
}

/// Per-source label counts and mean score for the five most prolific
/// sources; ties keep first-seen order.
///
/// Articles with an empty source are skipped. Fewer than two sources yields
/// `None`.
pub fn source_sentiment(articles: &[Article]) -> Option<Vec<SourceSentiment>> {
    let mut order: Vec<&str> = Vec::new();
    let mut tallies: HashMap<&str, SourceTally> = HashMap::new();

    for article in articles.iter().filter(|a| !a.source.trim().is_empty()) {
        let tally = tallies.entry(article.source.as_str()).or_insert_with(|| {
            order.push(article.source.as_str());
            SourceTally::default()
        });
        tally.articles += 1;
        match article.sentiment_label {
            Some(SentimentLabel::Positive) => tally.positive += 1,
            Some(SentimentLabel::Negative) => tally.negative += 1,
            _ => tally.neutral += 1,
        }
        tally.score_sum += article.sentiment_score.unwrap_or(0.0);
    }

    if order.len() < MIN_SOURCES {
        debug!(sources = order.len(), "Not enough sources for a breakdown");
        return None;
    }

    let mut rows: Vec<SourceSentiment> = order
        .into_iter()
        .filter_map(|source| {
            let t = tallies.get(source)?;
            Some(SourceSentiment {
                source: source.to_string(),
                articles: t.articles,
                positive: t.positive,
                neutral: t.neutral,
                negative: t.negative,
                avg_sentiment: round_to(t.score_sum / t.articles as f64, 2),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.articles.cmp(&a.articles));
    rows.truncate(MAX_CHART_SOURCES);
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::comparative::TopicSentiment;
    use pretty_assertions::assert_eq;

    fn article(title: &str, source: &str, date: Option<&str>, score: f64) -> Article {
        let mut a = Article::new(title, "", "https://example.com", source, date.map(str::to_string));
        a.sentiment_label = Some(SentimentLabel::from_score(score));
        a.sentiment_score = Some(score);
        a
    }

    fn stats(count: usize, avg_score: f64) -> TopicSentiment {
        TopicSentiment {
            count,
            avg_score,
            ..TopicSentiment::default()
        }
    }

    #[test]
    fn test_tone_thresholds() {
        assert_eq!(Tone::of(0.06), Tone::Positive);
        assert_eq!(Tone::of(0.05), Tone::Neutral);
        assert_eq!(Tone::of(-0.05), Tone::Neutral);
        assert_eq!(Tone::of(-0.06), Tone::Negative);
    }

    #[test]
    fn test_topic_chart_caps_and_orders() {
        let map: TopicSentimentMap = (0..10)
            .map(|i| (format!("topic{i}"), stats(if i == 4 { 5 } else { 1 }, 0.2)))
            .collect();
        let chart = topic_chart(&map);
        assert_eq!(chart.len(), MAX_CHART_TOPICS);
        assert_eq!(chart[0].topic, "topic4");
        assert_eq!(chart[1].topic, "topic0");
        assert_eq!(chart[0].tone, Tone::Positive);
        assert!(topic_chart(&TopicSentimentMap::new()).is_empty());
    }

    #[test]
    fn test_parse_article_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 2);
        for date in ["Mar 02, 2025", "March 2, 2025", "2025-03-02", "02 Mar 2025", "02/03/2025"] {
            assert_eq!(parse_article_date(date), expected, "{date}");
        }
        assert_eq!(parse_article_date("yesterday"), None);
    }

    #[test]
    fn test_timeline_sorted_and_skips_undated() {
        let articles = vec![
            article("c", "A", Some("March 3, 2025"), 0.1),
            article("a", "A", Some("2025-03-01"), -0.2),
            article("x", "A", None, 0.9),
            article("b", "A", Some("Mar 02, 2025"), 0.0),
            article("y", "A", Some("soon"), 0.9),
        ];
        let timeline = sentiment_timeline(&articles).unwrap();
        let titles: Vec<&str> = timeline.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(timeline[0].date, "2025-03-01");
        assert_eq!(timeline[0].sentiment_label, SentimentLabel::Negative);
    }

    #[test]
    fn test_timeline_needs_three_points() {
        let articles = vec![
            article("a", "A", Some("2025-03-01"), 0.1),
            article("b", "A", Some("2025-03-02"), 0.1),
        ];
        assert_eq!(sentiment_timeline(&articles), None);
    }

    #[test]
    fn test_source_sentiment() {
        let articles = vec![
            article("1", "Wire", None, 0.4),
            article("2", "Daily", None, -0.4),
            article("3", "Wire", None, 0.0),
            article("4", "", None, 0.9),
        ];
        let rows = source_sentiment(&articles).unwrap();
        assert_eq!(
            rows,
            vec![
                SourceSentiment {
                    source: "Wire".to_string(),
                    articles: 2,
                    positive: 1,
                    neutral: 1,
                    negative: 0,
                    avg_sentiment: 0.2,
                },
                SourceSentiment {
                    source: "Daily".to_string(),
                    articles: 1,
                    positive: 0,
                    neutral: 0,
                    negative: 1,
                    avg_sentiment: -0.4,
                },
            ]
        );
    }

    #[test]
    fn test_source_sentiment_needs_two_sources_and_caps_at_five() {
        let single = vec![article("1", "Wire", None, 0.4), article("2", "Wire", None, 0.1)];
        assert_eq!(source_sentiment(&single), None);

        let many: Vec<Article> = (0..7).map(|i| article("t", &format!("S{i}"), None, 0.0)).collect();
        let rows = source_sentiment(&many).unwrap();
        assert_eq!(rows.len(), MAX_CHART_SOURCES);
        assert_eq!(rows[0].source, "S0");
    }

    #[test]
    fn test_chart_data_build() {
        let articles = vec![article("1", "Wire", Some("2025-03-01"), 0.4)];
        let result = crate::analysis::comparative::ComparativeAnalyzer::new().aggregate(&articles);
        let charts = ChartData::build(&result, &articles);
        assert_eq!(charts.sentiment_distribution.positive, 100.0);
        assert!(charts.timeline.is_none());
        assert!(charts.sources.is_none());
        let value = serde_json::to_value(&charts).unwrap();
        assert!(value["timeline"].is_null());
    }
}
