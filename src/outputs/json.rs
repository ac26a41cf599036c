//! JSON output for API consumers.
//!
//! Files are grouped by date, one set per company and edition:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── acme_morning.json            # AnalysisReport
//!     ├── acme_morning_charts.json     # ChartData
//!     └── acme_morning_filtered.json   # query results, when a query was given
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

use super::Edition;
use crate::analysis::AnalysisReport;
use crate::analysis::query::{ArticleQuery, RankedArticle};
use crate::charts::ChartData;
use crate::error::Result;

/// Query results together with the query that produced them.
#[derive(Debug, Serialize)]
pub struct FilteredArticles<'a> {
    pub query: &'a ArticleQuery,
    pub count: usize,
    pub filtered_articles: &'a [RankedArticle],
}

async fn write_json<T: Serialize>(value: &T, json_output_dir: &str, edition: &Edition, suffix: &str) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(value)?;

    let dir = Path::new(json_output_dir).join(&edition.date);
    info!(dir = %dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&dir).await {
        error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = dir.join(format!("{}{}.json", edition.json_stem(), suffix));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON file");
    Ok(path)
}

/// Write the full report to `{json_output_dir}/{date}/{slug}_{tod}.json`.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(report: &AnalysisReport, json_output_dir: &str, edition: &Edition) -> Result<PathBuf> {
    write_json(report, json_output_dir, edition, "").await
}

/// Write chart series next to the report as `..._charts.json`.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_charts(charts: &ChartData, json_output_dir: &str, edition: &Edition) -> Result<PathBuf> {
    write_json(charts, json_output_dir, edition, "_charts").await
}

/// Write query results next to the report as `..._filtered.json`.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, count = results.len()))]
pub async fn write_filtered(
    query: &ArticleQuery,
    results: &[RankedArticle],
    json_output_dir: &str,
    edition: &Edition,
) -> Result<PathBuf> {
    let filtered = FilteredArticles {
        query,
        count: results.len(),
        filtered_articles: results,
    };
    write_json(&filtered, json_output_dir, edition, "_filtered").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::NewsAnalyzer;
    use crate::analysis::query::QueryEngine;
    use crate::config::AppConfig;
    use crate::scrapers::fallback;

    fn report() -> AnalysisReport {
        NewsAnalyzer::new(&AppConfig::default())
            .analyze("Acme", fallback::generate("Acme", 3))
            .unwrap()
    }

    #[tokio::test]
    async fn test_write_report_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let edition = Edition::new("Acme", "2025-03-02", "evening");
        let report = report();

        let path = write_report(&report, dir, &edition).await.unwrap();
        assert_eq!(path, tmp.path().join("2025-03-02").join("acme_evening.json"));

        let back: AnalysisReport = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, report);
    }

    #[tokio::test]
    async fn test_write_charts_and_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let edition = Edition::new("Acme", "2025-03-02", "morning");
        let report = report();

        let charts = ChartData::build(&report.analysis_result, &report.articles);
        let charts_path = write_charts(&charts, dir, &edition).await.unwrap();
        assert!(charts_path.ends_with("2025-03-02/acme_morning_charts.json"));

        let query = ArticleQuery {
            text: "growth".to_string(),
            ..ArticleQuery::default()
        };
        let results = QueryEngine::new().apply(&report.articles, &query);
        let path = write_filtered(&query, &results, dir, &edition).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["query"]["text"], "growth");
        assert_eq!(value["filtered_articles"][0]["relevance_score"], 1);
    }
}
