//! Human-readable renderings of an aggregate analysis.
//!
//! Two independent registers are produced from the same
//! `(company, result, articles)` triple:
//!
//! - [`detailed`]: a multi-section English report in Markdown
//! - [`narrative`]: a condensed Hindi narrative handed to the speech renderer
//!
//! Both are pure string building. Numbers are printed exactly as they sit in
//! the [`ComparativeAnalysisResult`]; nothing is re-rounded here. A rendering
//! failure never propagates: the infallible entry points log it and return a
//! short apology in the matching language.

pub mod detailed;
pub mod narrative;

use tracing::{error, instrument};

use crate::analysis::comparative::{ComparativeAnalysisResult, SentimentDistribution};
use crate::models::Article;

/// Gap, in percentage points, between the positive and negative shares that
/// makes coverage one-sided rather than balanced.
pub const INSIGHT_GAP: f64 = 20.0;

/// Which way the distribution leans under the ±20-point gap rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageLean {
    Positive,
    Negative,
    Balanced,
}

impl CoverageLean {
    pub fn of(distribution: &SentimentDistribution) -> Self {
        if distribution.positive > distribution.negative + INSIGHT_GAP {
            CoverageLean::Positive
        } else if distribution.negative > distribution.positive + INSIGHT_GAP {
            CoverageLean::Negative
        } else {
            CoverageLean::Balanced
        }
    }
}

/// Renders summaries; holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryComposer;

impl SummaryComposer {
    pub fn new() -> Self {
        Self
    }

    /// Detailed English report. Cites the true number of `articles`.
    #[instrument(level = "debug", skip_all, fields(company = %company, articles = articles.len()))]
    pub fn detailed(&self, company: &str, result: &ComparativeAnalysisResult, articles: &[Article]) -> String {
        detailed::render(company, result, articles.len()).unwrap_or_else(|e| {
            error!(error = %e, "Error creating summary");
            detailed::FALLBACK.to_string()
        })
    }

    /// Condensed Hindi narrative for speech synthesis.
    #[instrument(level = "debug", skip_all, fields(company = %company, articles = articles.len()))]
    pub fn narrative(&self, company: &str, result: &ComparativeAnalysisResult, articles: &[Article]) -> String {
        narrative::render(company, result, articles.len()).unwrap_or_else(|e| {
            error!(error = %e, "Error creating narrative summary");
            narrative::fallback(company)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(positive: f64, neutral: f64, negative: f64) -> SentimentDistribution {
        SentimentDistribution {
            positive,
            neutral,
            negative,
        }
    }

    #[test]
    fn test_coverage_lean_bands() {
        assert_eq!(CoverageLean::of(&dist(60.0, 20.0, 20.0)), CoverageLean::Positive);
        assert_eq!(CoverageLean::of(&dist(10.0, 20.0, 70.0)), CoverageLean::Negative);
        assert_eq!(CoverageLean::of(&dist(40.0, 40.0, 20.0)), CoverageLean::Balanced);
        assert_eq!(CoverageLean::of(&dist(33.3, 33.3, 33.3)), CoverageLean::Balanced);
        assert_eq!(CoverageLean::of(&dist(0.0, 0.0, 0.0)), CoverageLean::Balanced);
    }

    #[test]
    fn test_coverage_lean_gap_edges() {
        // a gap of exactly 20 points is still balanced
        assert_eq!(CoverageLean::of(&dist(40.0, 40.0, 20.0)), CoverageLean::Balanced);
        assert_eq!(CoverageLean::of(&dist(20.0, 40.0, 40.0)), CoverageLean::Balanced);
        assert_eq!(CoverageLean::of(&dist(40.1, 40.0, 19.9)), CoverageLean::Positive);
        assert_eq!(CoverageLean::of(&dist(19.9, 40.0, 40.1)), CoverageLean::Negative);
        assert_eq!(CoverageLean::of(&dist(50.0, 30.0, 20.0)), CoverageLean::Positive);
        assert_eq!(CoverageLean::of(&dist(51.0, 30.0, 19.0)), CoverageLean::Positive);
    }

    #[test]
    fn test_composer_renders_both_registers() {
        let composer = SummaryComposer::new();
        let result = ComparativeAnalysisResult::no_data();
        let detailed = composer.detailed("Acme", &result, &[]);
        assert!(detailed.starts_with("## Comprehensive Sentiment Analysis Report for Acme"));
        let narrative = composer.narrative("Acme", &result, &[]);
        assert!(narrative.starts_with("Acme के बारे में समाचार विश्लेषण रिपोर्ट"));
    }
}
