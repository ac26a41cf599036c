//! Index file management for navigation.
//!
//! `reports.md` in the Markdown directory lists every report ever written,
//! one entry per run with links to the report and to its superlative
//! articles. Entries are appended, so several runs per day (and per company)
//! accumulate in order.

use std::fmt::Write;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

use super::Edition;
use super::markdown::article_anchor;
use crate::analysis::AnalysisReport;
use crate::error::Result;
use crate::models::Article;
use crate::utils::{display_float, upcase};

pub const INDEX_FILE: &str = "reports.md";
const INDEX_HEADER: &str = "# Sentiment Reports\n";

fn superlative_link(md: &mut String, label: &str, article: &Article, markdown_filename: &str) -> std::fmt::Result {
    writeln!(
        md,
        "\t- {}: [{}](./{}#{})",
        label,
        article.title,
        markdown_filename,
        article_anchor(article)
    )
}

/// Render the index entry for one report.
pub fn index_entry(report: &AnalysisReport, edition: &Edition, markdown_filename: &str) -> Result<String> {
    let result = &report.analysis_result;
    let mut md = String::new();

    writeln!(
        md,
        "- [{}, {} {}](./{}): **{}**, {} articles, average {}",
        report.company,
        edition.date,
        upcase(&edition.time_of_day),
        markdown_filename,
        result.overall_sentiment.as_str().to_uppercase(),
        report.articles.len(),
        display_float(result.average_score),
    )?;
    if let Some(article) = &result.most_positive {
        superlative_link(&mut md, "Most positive", article, markdown_filename)?;
    }
    if let Some(article) = &result.most_negative {
        superlative_link(&mut md, "Most negative", article, markdown_filename)?;
    }
    Ok(md)
}

/// Append this run's entry to `{markdown_output_dir}/reports.md`, creating
/// the file with a header on first use.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir, file = %markdown_filename))]
pub async fn update_reports_index(
    markdown_output_dir: &str,
    report: &AnalysisReport,
    edition: &Edition,
    markdown_filename: &str,
) -> Result<()> {
    let index_path = Path::new(markdown_output_dir).join(INDEX_FILE);
    let mut content = String::new();
    if !index_path.exists() {
        writeln!(content, "{INDEX_HEADER}")?;
    }
    content.push_str(&index_entry(report, edition, markdown_filename)?);

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&index_path)
        .await?;
    file.write_all(content.as_bytes()).await?;
    info!(path = %index_path.display(), "Updated reports index");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::NewsAnalyzer;
    use crate::config::AppConfig;
    use crate::scrapers::fallback;
    use pretty_assertions::assert_eq;

    fn report() -> AnalysisReport {
        NewsAnalyzer::new(&AppConfig::default())
            .analyze("Acme", fallback::generate("Acme", 3))
            .unwrap()
    }

    #[test]
    fn test_index_entry() {
        let edition = Edition::new("Acme", "2025-03-02", "morning");
        let entry = index_entry(&report(), &edition, "acme_2025-03-02_morning.md").unwrap();
        assert_eq!(
            entry,
            "- [Acme, 2025-03-02 Morning](./acme_2025-03-02_morning.md): **NEUTRAL**, 3 articles, average 0.0\n\
             \t- Most positive: [Acme Reports Strong Growth in Q4](./acme_2025-03-02_morning.md#acme-reports-strong-growth-in-q4)\n\
             \t- Most negative: [Acme Faces Challenges in International Markets](./acme_2025-03-02_morning.md#acme-faces-challenges-in-international-markets)\n"
        );
    }

    #[tokio::test]
    async fn test_update_reports_index_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let report = report();

        let morning = Edition::new("Acme", "2025-03-02", "morning");
        let evening = Edition::new("Acme", "2025-03-02", "evening");
        update_reports_index(dir, &report, &morning, "a.md").await.unwrap();
        update_reports_index(dir, &report, &evening, "b.md").await.unwrap();

        let index = std::fs::read_to_string(tmp.path().join(INDEX_FILE)).unwrap();
        assert!(index.starts_with("# Sentiment Reports\n\n- [Acme, 2025-03-02 Morning](./a.md)"));
        assert_eq!(index.matches("# Sentiment Reports").count(), 1);
        assert!(index.contains("- [Acme, 2025-03-02 Evening](./b.md)"));
    }
}
