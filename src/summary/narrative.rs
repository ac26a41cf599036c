//! Condensed Hindi narrative handed to the text-to-speech renderer.
//!
//! Plain text with line breaks only; no Markdown.

use std::fmt::{self, Write};

use super::CoverageLean;
use crate::analysis::comparative::{ComparativeAnalysisResult, OverallSentiment};
use crate::utils::display_float;

/// Common topics read out in the narrative.
const MAX_SPOKEN_TOPICS: usize = 5;

/// Hindi word for an overall sentiment; anything other than positive or
/// negative reads as neutral.
pub fn hindi_sentiment(sentiment: OverallSentiment) -> &'static str {
    match sentiment {
        OverallSentiment::Positive => "सकारात्मक",
        OverallSentiment::Negative => "नकारात्मक",
        OverallSentiment::Neutral | OverallSentiment::NoData => "तटस्थ",
    }
}

/// Returned when rendering fails.
pub fn fallback(company: &str) -> String {
    format!("{company} के बारे में समाचार विश्लेषण। कृपया समाचार लेखों और विश्लेषण की समीक्षा करें।")
}

/// Render the narrative for `total_articles` articles.
pub fn render(company: &str, result: &ComparativeAnalysisResult, total_articles: usize) -> Result<String, fmt::Error> {
    let d = &result.sentiment_distribution;
    let mut out = String::new();

    writeln!(out, "{company} के बारे में समाचार विश्लेषण रिपोर्ट\n")?;
    writeln!(
        out,
        "{total_articles} समाचार लेखों के आधार पर, {company} के बारे में समग्र भावना {} है।\n",
        hindi_sentiment(result.overall_sentiment)
    )?;

    writeln!(out, "भावना वितरण:")?;
    writeln!(out, "- सकारात्मक: {}%", display_float(d.positive))?;
    writeln!(out, "- तटस्थ: {}%", display_float(d.neutral))?;
    writeln!(out, "- नकारात्मक: {}%\n", display_float(d.negative))?;

    writeln!(
        out,
        "औसत भावना स्कोर: {} (-1 से 1 के पैमाने पर)\n",
        display_float(result.average_score)
    )?;

    if !result.common_topics.is_empty() {
        let spoken: Vec<&str> = result
            .common_topics
            .iter()
            .take(MAX_SPOKEN_TOPICS)
            .map(String::as_str)
            .collect();
        writeln!(out, "समाचार कवरेज में सामान्य विषय: {}\n", spoken.join(", "))?;
    }

    writeln!(out, "मुख्य अंतर्दृष्टि:")?;
    match CoverageLean::of(d) {
        CoverageLean::Positive => writeln!(out, "- {company} को मुख्य रूप से सकारात्मक समाचार कवरेज मिल रहा है।")?,
        CoverageLean::Negative => {
            writeln!(out, "- {company} वर्तमान में महत्वपूर्ण नकारात्मक प्रेस का सामना कर रहा है।")?
        }
        CoverageLean::Balanced => writeln!(out, "- {company} का मिश्रित या संतुलित समाचार कवरेज है।")?,
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::comparative::ComparativeAnalyzer;
    use crate::models::{Article, SentimentLabel};
    use pretty_assertions::assert_eq;

    fn article(score: f64, topics: &[&str]) -> Article {
        let mut a = Article::new("t", "s", "https://example.com", "Wire", None);
        a.sentiment_label = Some(SentimentLabel::from_score(score));
        a.sentiment_score = Some(score);
        a.topics = topics.iter().map(|t| t.to_string()).collect();
        a
    }

    #[test]
    fn test_render_positive_narrative() {
        let articles = vec![
            article(0.5, &["growth", "revenue"]),
            article(0.3, &["growth"]),
            article(0.0, &["product"]),
            article(0.25, &["dividend"]),
        ];
        let result = ComparativeAnalyzer::new().aggregate(&articles);
        let text = render("Acme", &result, articles.len()).unwrap();
        let expected = "\
Acme के बारे में समाचार विश्लेषण रिपोर्ट

4 समाचार लेखों के आधार पर, Acme के बारे में समग्र भावना सकारात्मक है।

भावना वितरण:
- सकारात्मक: 75.0%
- तटस्थ: 25.0%
- नकारात्मक: 0.0%

औसत भावना स्कोर: 0.26 (-1 से 1 के पैमाने पर)

समाचार कवरेज में सामान्य विषय: growth, revenue, product, dividend

मुख्य अंतर्दृष्टि:
- Acme को मुख्य रूप से सकारात्मक समाचार कवरेज मिल रहा है।
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_negative_and_balanced_insights() {
        let negative = ComparativeAnalyzer::new().aggregate(&[article(-0.4, &[]), article(-0.2, &[])]);
        let text = render("Acme", &negative, 2).unwrap();
        assert!(text.contains("समग्र भावना नकारात्मक है।"));
        assert!(text.ends_with("- Acme वर्तमान में महत्वपूर्ण नकारात्मक प्रेस का सामना कर रहा है।\n"));
        assert!(!text.contains("सामान्य विषय"));

        let balanced = ComparativeAnalyzer::new().aggregate(&[article(0.6, &[]), article(-0.6, &[])]);
        let text = render("Acme", &balanced, 2).unwrap();
        assert!(text.ends_with("- Acme का मिश्रित या संतुलित समाचार कवरेज है।\n"));
    }

    #[test]
    fn test_only_five_topics_are_spoken() {
        let topics = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];
        let result = ComparativeAnalyzer::new().aggregate(&[article(0.1, &topics)]);
        let text = render("Acme", &result, 1).unwrap();
        assert!(text.contains("सामान्य विषय: alpha, bravo, charlie, delta, echo\n"));
        assert!(!text.contains("foxtrot"));
    }

    #[test]
    fn test_no_data_reads_as_neutral() {
        assert_eq!(hindi_sentiment(OverallSentiment::NoData), "तटस्थ");
        let text = render("Acme", &ComparativeAnalysisResult::no_data(), 0).unwrap();
        assert!(text.contains("0 समाचार लेखों के आधार पर"));
    }

    #[test]
    fn test_fallback_names_company() {
        assert_eq!(
            fallback("Acme"),
            "Acme के बारे में समाचार विश्लेषण। कृपया समाचार लेखों और विश्लेषण की समीक्षा करें।"
        );
    }
}
