//! The analysis pipeline.
//!
//! ```text
//! candidates → Article → score + extract topics → aggregate → summarize
//!                                    └──────────────→ query / filter on demand
//! ```
//!
//! [`NewsAnalyzer`] bundles one instance of each component. Build it once per
//! process (loading the sentiment lexicon is the expensive part) and share it
//! by reference; every method takes `&self` and works only on the
//! caller's own article collection.

pub mod comparative;
pub mod query;
pub mod sentiment;
pub mod topics;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::error::{NewsError, Result};
use crate::models::Article;
use crate::summary::SummaryComposer;
use comparative::{ComparativeAnalysisResult, ComparativeAnalyzer};
use query::{ArticleQuery, QueryEngine, RankedArticle};
use sentiment::SentimentScorer;
use topics::TopicExtractor;

/// What one analysis run hands back: the enriched articles, their aggregate,
/// and the detailed summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub company: String,
    pub articles: Vec<Article>,
    pub analysis_result: ComparativeAnalysisResult,
    pub summary: String,
}

/// Build-once, share-read-only facade over the pipeline components.
#[derive(Debug)]
pub struct NewsAnalyzer {
    scorer: SentimentScorer,
    topics: TopicExtractor,
    comparative: ComparativeAnalyzer,
    composer: SummaryComposer,
    query: QueryEngine,
}

impl NewsAnalyzer {
    /// Load the models and size the topic extractor from `config`.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_parts(
            SentimentScorer::new(),
            TopicExtractor::with_max_topics(config.topics_per_article),
        )
    }

    /// Assemble an analyzer from already-built models.
    pub fn with_parts(scorer: SentimentScorer, topics: TopicExtractor) -> Self {
        Self {
            scorer,
            topics,
            comparative: ComparativeAnalyzer::new(),
            composer: SummaryComposer::new(),
            query: QueryEngine::new(),
        }
    }

    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    pub fn topic_extractor(&self) -> &TopicExtractor {
        &self.topics
    }

    pub fn query_engine(&self) -> &QueryEngine {
        &self.query
    }

    /// Score unscored articles and extract topics for articles that have
    /// none. Pre-labeled articles are left as given.
    #[instrument(level = "info", skip_all, fields(count = articles.len()))]
    pub fn enrich(&self, articles: &mut [Article]) {
        let mut scored = 0usize;
        for article in articles.iter_mut() {
            if !article.is_scored() {
                self.scorer.score_article(article);
                scored += 1;
            }
            if article.topics.is_empty() {
                self.topics.extract_article_topics(article);
            }
        }
        info!(scored, kept = articles.len() - scored, "Enriched articles");
    }

    /// Enrich `articles`, aggregate them, and render the detailed summary.
    ///
    /// # Arguments
    ///
    /// * `company` - Company the coverage is about; surrounding whitespace is
    ///   trimmed.
    /// * `articles` - Scored or unscored articles. Unscored ones are scored and
    ///   articles without topics get extracted topics.
    ///
    /// # Returns
    ///
    /// The enriched articles with their aggregate result and summary.
    ///
    /// # Errors
    ///
    /// [`NewsError::MissingCompanyName`] for a blank company and
    /// [`NewsError::NoArticles`] for an empty list. Every later stage degrades
    /// instead of failing.
    #[instrument(level = "info", skip_all, fields(company = %company, count = articles.len()))]
    pub fn analyze(&self, company: &str, mut articles: Vec<Article>) -> Result<AnalysisReport> {
        let company = company.trim();
        if company.is_empty() {
            warn!("Rejected analysis request without a company name");
            return Err(NewsError::MissingCompanyName);
        }
        if articles.is_empty() {
            warn!(company, "Rejected analysis request without articles");
            return Err(NewsError::NoArticles);
        }

        self.enrich(&mut articles);
        let analysis_result = self.comparative.aggregate(&articles);
        let summary = self.composer.detailed(company, &analysis_result, &articles);
        info!(
            overall = %analysis_result.overall_sentiment,
            average = analysis_result.average_score,
            topics = analysis_result.common_topics.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            company: company.to_string(),
            articles,
            analysis_result,
            summary,
        })
    }

    /// Condensed narrative of a finished report for speech synthesis.
    pub fn narrate(&self, report: &AnalysisReport) -> String {
        self.composer
            .narrative(&report.company, &report.analysis_result, &report.articles)
    }

    /// Run a combined query over a report's articles.
    pub fn query(&self, report: &AnalysisReport, query: &ArticleQuery) -> Vec<RankedArticle> {
        self.query.apply(&report.articles, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::comparative::OverallSentiment;
    use crate::models::SentimentLabel;
    use pretty_assertions::assert_eq;

    fn analyzer() -> NewsAnalyzer {
        NewsAnalyzer::new(&AppConfig::default())
    }

    fn raw(title: &str, summary: &str) -> Article {
        Article::new(title, summary, "https://example.com/a", "Wire", None)
    }

    fn labeled(title: &str, label: SentimentLabel, score: f64, topics: &[&str]) -> Article {
        let mut a = raw(title, "");
        a.sentiment_label = Some(label);
        a.sentiment_score = Some(score);
        a.topics = topics.iter().map(|t| t.to_string()).collect();
        a
    }

    #[test]
    fn test_rejects_missing_company_and_articles() {
        let analyzer = analyzer();
        assert!(matches!(
            analyzer.analyze("  ", vec![raw("a", "b")]),
            Err(NewsError::MissingCompanyName)
        ));
        assert!(matches!(analyzer.analyze("Acme", Vec::new()), Err(NewsError::NoArticles)));
    }

    #[test]
    fn test_enrich_scores_and_extracts() {
        let analyzer = analyzer();
        let mut articles = vec![raw(
            "Acme posts excellent quarterly profits",
            "Investors cheer excellent profits and strong dividend growth",
        )];
        analyzer.enrich(&mut articles);
        let article = &articles[0];
        assert!(article.is_scored());
        assert_eq!(
            article.sentiment_label,
            article.sentiment_score.map(SentimentLabel::from_score)
        );
        assert!(!article.topics.is_empty());
        assert!(article.topics.len() <= 5);
    }

    #[test]
    fn test_enrich_keeps_prelabeled_articles() {
        let analyzer = analyzer();
        let original = labeled("Acme Holds Steady", SentimentLabel::Negative, -0.3, &["steady"]);
        let mut articles = vec![original.clone()];
        analyzer.enrich(&mut articles);
        assert_eq!(articles[0], original);
    }

    #[test]
    fn test_analyze_prelabeled_scenario() {
        let analyzer = analyzer();
        let articles = vec![
            labeled("Up", SentimentLabel::Positive, 0.6, &["growth"]),
            labeled("Down", SentimentLabel::Negative, -0.6, &["lawsuit"]),
            labeled("Flat", SentimentLabel::Neutral, 0.0, &["plans"]),
        ];
        let report = analyzer.analyze(" Acme ", articles).unwrap();
        assert_eq!(report.company, "Acme");
        assert_eq!(report.analysis_result.overall_sentiment, OverallSentiment::Neutral);
        assert_eq!(report.analysis_result.average_score, 0.0);
        assert_eq!(report.analysis_result.most_positive.as_ref().unwrap().title, "Up");
        assert_eq!(report.analysis_result.most_negative.as_ref().unwrap().title, "Down");
        assert!(report.summary.contains("Based on an analysis of 3 news articles"));

        let narrative = analyzer.narrate(&report);
        assert!(narrative.starts_with("Acme के बारे में"));

        let hits = analyzer.query(
            &report,
            &ArticleQuery {
                sentiment: "negative".to_string(),
                ..ArticleQuery::default()
            },
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].article.title, "Down");
    }

    #[test]
    fn test_report_json_shape() {
        let analyzer = analyzer();
        let report = analyzer
            .analyze("Acme", vec![labeled("Up", SentimentLabel::Positive, 0.4, &["growth"])])
            .unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["company"], "Acme");
        assert_eq!(value["articles"][0]["sentiment_label"], "positive");
        assert_eq!(value["analysis_result"]["overall_sentiment"], "positive");
        assert!(value["summary"].as_str().unwrap().starts_with("## Comprehensive"));
    }
}
