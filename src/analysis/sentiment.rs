//! Lexicon-based sentiment scoring.
//!
//! Wraps the VADER (Valence Aware Dictionary and sEntiment Reasoner) model,
//! which needs no training step and no network access and is deterministic
//! for identical input. Its compound score is mapped onto a
//! [`SentimentLabel`] with the ±0.05 threshold rule.
//!
//! Scoring never aborts the pipeline: [`SentimentScorer::score`] degrades to
//! `(neutral, 0.0)` when the model is unavailable or fails.

use std::panic::{self, AssertUnwindSafe};
use tracing::{error, instrument};
use vader_sentiment::SentimentIntensityAnalyzer;

use crate::error::{NewsError, Result};
use crate::models::{Article, SentimentLabel};

/// Full polarity breakdown for one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    /// Signed overall polarity in `[-1, 1]`.
    pub compound: f64,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentScore {
    /// The score used when the model cannot produce one.
    pub const NEUTRAL: SentimentScore = SentimentScore {
        label: SentimentLabel::Neutral,
        compound: 0.0,
        positive: 0.0,
        neutral: 0.0,
        negative: 0.0,
    };

    /// Build a score from the model's four sub-scores; the label follows the
    /// compound score.
    pub fn from_parts(compound: f64, positive: f64, neutral: f64, negative: f64) -> Self {
        Self {
            label: SentimentLabel::from_score(compound),
            compound,
            positive,
            neutral,
            negative,
        }
    }

    /// `(label, compound)`.
    pub fn pair(&self) -> (SentimentLabel, f64) {
        (self.label, self.compound)
    }
}

/// Read-only sentiment model; build once and share across callers.
pub struct SentimentScorer {
    model: Option<SentimentIntensityAnalyzer<'static>>,
}

impl std::fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentScorer")
            .field("model_loaded", &self.model.is_some())
            .finish()
    }
}

impl SentimentScorer {
    /// Load the VADER lexicon. A lexicon that fails to load leaves the scorer
    /// in the unavailable state rather than failing construction.
    pub fn new() -> Self {
        match panic::catch_unwind(|| SentimentIntensityAnalyzer::new()) {
            Ok(model) => Self { model: Some(model) },
            Err(_) => {
                error!("Error initializing sentiment lexicon; scores will default to neutral");
                Self::unavailable()
            }
        }
    }

    /// A scorer with no model behind it. Every call to [`score`](Self::score)
    /// returns the neutral fallback.
    pub fn unavailable() -> Self {
        Self { model: None }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// Score `text`, surfacing model failures.
    pub fn try_score(&self, text: &str) -> Result<SentimentScore> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| NewsError::SentimentModel("sentiment lexicon is not initialized".into()))?;

        let parts = panic::catch_unwind(AssertUnwindSafe(|| {
            let scores = model.polarity_scores(text);
            (
                scores.get("compound").copied(),
                scores.get("pos").copied().unwrap_or(0.0),
                scores.get("neu").copied().unwrap_or(0.0),
                scores.get("neg").copied().unwrap_or(0.0),
            )
        }))
        .map_err(|_| NewsError::SentimentModel("sentiment model panicked while scoring".into()))?;

        match parts {
            (Some(compound), pos, neu, neg) if compound.is_finite() => {
                Ok(SentimentScore::from_parts(compound, pos, neu, neg))
            }
            (Some(compound), ..) => Err(NewsError::SentimentModel(format!(
                "model produced a non-finite compound score ({compound})"
            ))),
            (None, ..) => Err(NewsError::SentimentModel(
                "model output has no compound score".into(),
            )),
        }
    }

    /// Score `text`, falling back to `(neutral, 0.0)` on any failure.
    pub fn score(&self, text: &str) -> SentimentScore {
        self.try_score(text).unwrap_or_else(|e| {
            error!(error = %e, "Error analyzing sentiment; defaulting to neutral");
            SentimentScore::NEUTRAL
        })
    }

    /// Score an article's title and summary together and record the result on
    /// the article.
    #[instrument(level = "debug", skip_all, fields(title = %article.title))]
    pub fn score_article(&self, article: &mut Article) -> SentimentScore {
        let score = self.score(&article.analysis_text());
        article.sentiment_label = Some(score.label);
        article.sentiment_score = Some(score.compound);
        score
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}
