//! Markdown report and plain-text narrative output.
//!
//! The Markdown file embeds the detailed summary and follows it with one
//! section per article. The narrative is written verbatim as UTF-8 text for
//! the speech renderer.

use std::fmt::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

use super::Edition;
use crate::analysis::AnalysisReport;
use crate::error::Result;
use crate::models::Article;
use crate::utils::{slugify_title, upcase};

fn write_article(md: &mut String, article: &Article) -> std::fmt::Result {
    writeln!(md, "### {}\n", article.title)?;
    match &article.date {
        Some(date) => writeln!(md, "*{}, {}*\n", article.source, date)?,
        None => writeln!(md, "*{}*\n", article.source)?,
    }
    if let (Some(label), Some(score)) = (article.sentiment_label, article.sentiment_score) {
        writeln!(md, "**Sentiment:** {} ({:.2})\n", upcase(label.as_str()), score)?;
    }
    writeln!(md, "{}\n", article.summary)?;
    if !article.topics.is_empty() {
        let tags: Vec<String> = article.topics.iter().map(|t| format!("`{t}`")).collect();
        writeln!(md, "**Topics:** {}\n", tags.join(" "))?;
    }
    writeln!(md, "[Read full article]({})\n", article.url)
}

/// Render a report as a standalone Markdown document.
pub fn report_to_markdown(report: &AnalysisReport, edition: &Edition) -> Result<String> {
    let mut md = String::new();

    writeln!(
        md,
        "# {} News Sentiment: {} {}\n",
        report.company,
        edition.date,
        upcase(&edition.time_of_day)
    )?;
    writeln!(md, "{}\n", report.summary.trim_end())?;

    writeln!(md, "## Articles\n")?;
    for article in &report.articles {
        write_article(&mut md, article)?;
    }

    Ok(md)
}

/// Anchor slug of an article heading within the report.
pub fn article_anchor(article: &Article) -> String {
    slugify_title(&article.title)
}

/// Write the report to `{markdown_output_dir}/{slug}_{date}_{tod}.md` and
/// return the file name.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir))]
pub async fn write_report(report: &AnalysisReport, markdown_output_dir: &str, edition: &Edition) -> Result<String> {
    let md = report_to_markdown(report, edition)?;
    fs::create_dir_all(markdown_output_dir).await?;

    let filename = format!("{}.md", edition.markdown_stem());
    let path = Path::new(markdown_output_dir).join(&filename);
    fs::write(&path, md).await?;
    info!(path = %path.display(), "Wrote Markdown report");
    Ok(filename)
}

/// Write the speech narrative to `{markdown_output_dir}/{slug}_{date}_{tod}_narrative.txt`.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir))]
pub async fn write_narrative(narrative: &str, markdown_output_dir: &str, edition: &Edition) -> Result<PathBuf> {
    fs::create_dir_all(markdown_output_dir).await?;
    let path = Path::new(markdown_output_dir).join(format!("{}_narrative.txt", edition.markdown_stem()));
    fs::write(&path, narrative).await?;
    info!(path = %path.display(), bytes = narrative.len(), "Wrote narrative");
    Ok(path)
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
    fn test_report_to_markdown() {
        let report = report();
        let edition = Edition::new("Acme", "2025-03-02", "morning");
        let md = report_to_markdown(&report, &edition).unwrap();

        assert!(md.starts_with("# Acme News Sentiment: 2025-03-02 Morning\n\n## Comprehensive"));
        assert!(md.contains("## Articles\n\n### Acme Announces New Product Line\n\n*Financial News 2, March 1, 2025*\n\n"));
        assert!(md.contains("**Sentiment:** Negative (-0.30)"));
        assert!(md.contains("**Topics:** `growth` `revenue` `earnings` `quarterly` `results`"));
        assert!(md.contains("[Read full article](https://example.com/news/3)"));
        assert_eq!(md.matches("### Acme").count(), 3);
    }

    #[test]
    fn test_article_anchor() {
        let article = Article::new("Acme Soars 10%!", "", "u", "s", None);
        assert_eq!(article_anchor(&article), "acme-soars-10");
    }

    #[tokio::test]
    async fn test_write_report_and_narrative() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("md");
        let dir = dir.to_str().unwrap();
        let edition = Edition::new("Acme", "2025-03-02", "evening");
        let report = report();

        let filename = write_report(&report, dir, &edition).await.unwrap();
        assert_eq!(filename, "acme_2025-03-02_evening.md");
        let written = std::fs::read_to_string(Path::new(dir).join(&filename)).unwrap();
        assert_eq!(written, report_to_markdown(&report, &edition).unwrap());

        let path = write_narrative("नमस्ते\n", dir, &edition).await.unwrap();
        assert!(path.ends_with("acme_2025-03-02_evening_narrative.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "नमस्ते\n");
    }
}
