//! Detailed English report.
//!
//! Sections, in order: overview, sentiment distribution with a trend
//! sentence, key articles, topic analysis (only when there are common
//! topics), and up to five strategic insights.

use std::fmt::{self, Write};

use super::CoverageLean;
use crate::analysis::comparative::{ComparativeAnalysisResult, SentimentDistribution, TopicSentimentMap};
use crate::models::Article;
use crate::utils::display_float;

/// Returned when rendering fails.
pub const FALLBACK: &str =
    "Summary generation failed. Please review the news articles and analysis directly.";

/// Topics listed in the topic analysis section.
const MAX_REPORTED_TOPICS: usize = 7;
/// Bullets in the strategic insights section.
const MAX_INSIGHTS: usize = 5;
/// `avg_score` band for a topic's local label.
const TOPIC_TONE_BAND: f64 = 0.1;
/// `avg_score` band for a topic to earn its own insight.
const TOPIC_INSIGHT_BAND: f64 = 0.2;
/// Minimum mentions for a topic to earn its own insight.
const TOPIC_INSIGHT_MIN_COUNT: usize = 2;

const MARKET_MARKERS: [&str; 3] = ["competitor", "competition", "market"];

/// Qualitative trend sentence for the distribution.
pub fn trend_sentence(company: &str, d: &SentimentDistribution) -> String {
    if d.positive > 50.0 {
        format!(
            "The media portrayal of {company} is predominantly positive, suggesting favorable public perception."
        )
    } else if d.negative > 50.0 {
        format!(
            "The media portrayal of {company} shows concerning levels of negative coverage that may require attention."
        )
    } else if d.positive > d.negative + 10.0 {
        format!(
            "While mixed, the coverage leans positive, indicating a generally favorable perception of {company}."
        )
    } else if d.negative > d.positive + 10.0 {
        format!("The coverage shows a negative bias that could potentially impact {company}'s public image.")
    } else {
        format!(
            "The coverage is notably balanced, suggesting that {company} is experiencing mixed reception in current news cycles."
        )
    }
}

/// Topic-local label from its average score, thresholded at ±0.1.
pub fn topic_tone(avg_score: f64) -> &'static str {
    if avg_score > TOPIC_TONE_BAND {
        "positive"
    } else if avg_score < -TOPIC_TONE_BAND {
        "negative"
    } else {
        "neutral"
    }
}

/// Up to five insight bullets: one for the overall lean, one per strongly
/// toned recurring topic, and one if coverage mentions markets or rivals.
pub fn strategic_insights(
    company: &str,
    distribution: &SentimentDistribution,
    common_topics: &[String],
    topic_sentiment: &TopicSentimentMap,
) -> Vec<String> {
    let mut insights = vec![match CoverageLean::of(distribution) {
        CoverageLean::Positive => format!(
            "- {company} is enjoying strong positive media coverage that could be leveraged for marketing and PR initiatives."
        ),
        CoverageLean::Negative => format!(
            "- {company} faces significant negative press that may require proactive reputation management."
        ),
        CoverageLean::Balanced => format!(
            "- {company} has balanced news coverage, presenting an opportunity to strengthen positive narratives."
        ),
    }];

    for (topic, stats) in topic_sentiment.iter() {
        if stats.count < TOPIC_INSIGHT_MIN_COUNT {
            continue;
        }
        if stats.avg_score > TOPIC_INSIGHT_BAND {
            insights.push(format!(
                "- Positive coverage regarding '{topic}' presents an opportunity for further emphasis in communications."
            ));
        } else if stats.avg_score < -TOPIC_INSIGHT_BAND {
            insights.push(format!(
                "- Concerns expressed about '{topic}' may require specific attention and addressing in future messaging."
            ));
        }
    }

    if common_topics
        .iter()
        .any(|t| MARKET_MARKERS.iter().any(|m| t.contains(m)))
    {
        insights.push(
            "- Industry or competitive mentions suggest monitoring market positioning in media coverage."
                .to_string(),
        );
    }

    insights.truncate(MAX_INSIGHTS);
    insights
}

fn write_key_article(out: &mut String, heading: &str, article: &Article) -> fmt::Result {
    writeln!(out, "**{heading}:**")?;
    writeln!(out, "'{}'", article.title)?;
    writeln!(out, "Source: {}", article.source)?;
    let score = article
        .sentiment_score
        .map(display_float)
        .unwrap_or_else(|| "n/a".to_string());
    writeln!(out, "Sentiment Score: {score}\n")
}

/// Render the report for `total_articles` articles.
pub fn render(company: &str, result: &ComparativeAnalysisResult, total_articles: usize) -> Result<String, fmt::Error> {
    let d = &result.sentiment_distribution;
    let mut out = String::new();

    writeln!(out, "## Comprehensive Sentiment Analysis Report for {company}\n")?;

    writeln!(out, "### Overview")?;
    writeln!(
        out,
        "Based on an analysis of {total_articles} news articles, the overall sentiment toward {company} is **{}** with an average sentiment score of **{}** (on a scale from -1 to 1).\n",
        result.overall_sentiment.as_str().to_uppercase(),
        display_float(result.average_score),
    )?;

    writeln!(out, "### Sentiment Distribution")?;
    writeln!(out, "- **Positive coverage**: {}%", display_float(d.positive))?;
    writeln!(out, "- **Neutral coverage**: {}%", display_float(d.neutral))?;
    writeln!(out, "- **Negative coverage**: {}%\n", display_float(d.negative))?;
    writeln!(out, "{}\n", trend_sentence(company, d))?;

    writeln!(out, "### Key Articles\n")?;
    if let Some(article) = &result.most_positive {
        write_key_article(&mut out, "Most Positive Article", article)?;
    }
    if let Some(article) = &result.most_negative {
        write_key_article(&mut out, "Most Negative Article", article)?;
    }

    if !result.common_topics.is_empty() {
        writeln!(out, "### Topic Analysis\n")?;
        writeln!(
            out,
            "The following key topics dominate the current news coverage of {company}:\n"
        )?;
        for topic in result.common_topics.iter().take(MAX_REPORTED_TOPICS) {
            if let Some(stats) = result.topic_sentiment.get(topic) {
                writeln!(
                    out,
                    "- **{topic}**: Mentioned in {} articles with {} sentiment ({})",
                    stats.count,
                    topic_tone(stats.avg_score),
                    display_float(stats.avg_score),
                )?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "### Strategic Insights\n")?;
    let insights = strategic_insights(company, d, &result.common_topics, &result.topic_sentiment);
    write!(out, "{}", insights.join("\n"))?;

    Ok(out)
}
