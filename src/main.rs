//! # Awful News Sentiment
//!
//! Runs one analysis of the news coverage about a company and writes the
//! results.
//!
//! ## Usage
//!
//! ```sh
//! awful_news_sentiment -c "Acme" -j ./json -m ./markdown
//! ```
//!
//! ## Pipeline
//!
//! 1. **Collect**: live Google News results, topped up with generated articles
//! 2. **Analyze**: score, extract topics, aggregate, summarize
//! 3. **Query**: apply `--query`/`--sentiment`/`--topic` when given
//! 4. **Output**: JSON report, chart data, Markdown report, narrative, index

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use awful_news_sentiment::analysis::NewsAnalyzer;
use awful_news_sentiment::charts::ChartData;
use awful_news_sentiment::cli::Cli;
use awful_news_sentiment::config::AppConfig;
use awful_news_sentiment::outputs::{Edition, indexes, json, markdown};
use awful_news_sentiment::scrapers;
use awful_news_sentiment::utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_sentiment starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Early check: both output dirs must be writable
    for dir in [&args.json_output_dir, &args.markdown_output_dir] {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Output directory is not writable (fix perms or choose a different path)");
            return Err(e.into());
        }
    }

    let config = AppConfig::load(args.config.as_deref()).await?;
    let analyzer = NewsAnalyzer::new(&config);

    // ---- Collect and analyze ----
    let articles = scrapers::collect_articles(&args.company, args.num_articles, &config, args.offline).await;
    let report = analyzer.analyze(&args.company, articles)?;
    debug!(summary = %truncate_for_log(&report.summary, 300), "Detailed summary");

    let edition = Edition::now(&report.company);
    info!(time_of_day = %edition.time_of_day, date = %edition.date, "Edition initialized");

    // ---- JSON output ----
    let charts = ChartData::build(&report.analysis_result, &report.articles);
    let query = args.article_query();
    let filtered = (!query.is_identity()).then(|| analyzer.query(&report, &query));
    if let Some(results) = &filtered {
        info!(matched = results.len(), "Applied article query");
    }

    let (report_res, charts_res, filtered_res) = futures::join!(
        json::write_report(&report, &args.json_output_dir, &edition),
        json::write_charts(&charts, &args.json_output_dir, &edition),
        async {
            match &filtered {
                Some(results) => json::write_filtered(&query, results, &args.json_output_dir, &edition)
                    .await
                    .map(Some),
                None => Ok(None),
            }
        },
    );
    if let Err(e) = report_res {
        error!(error = %e, "Failed to write JSON report");
    }
    if let Err(e) = charts_res {
        error!(error = %e, "Failed to write chart data");
    }
    if let Err(e) = filtered_res {
        error!(error = %e, "Failed to write filtered articles");
    }

    // ---- Markdown output ----
    match markdown::write_report(&report, &args.markdown_output_dir, &edition).await {
        Ok(markdown_filename) => {
            if let Err(e) =
                indexes::update_reports_index(&args.markdown_output_dir, &report, &edition, &markdown_filename).await
            {
                error!(error = %e, "Failed to update reports index");
            }
        }
        Err(e) => error!(error = %e, "Failed writing Markdown report"),
    }

    // ---- Narrative for speech synthesis ----
    let narrative = analyzer.narrate(&report);
    if let Err(e) = markdown::write_narrative(&narrative, &args.markdown_output_dir, &edition).await {
        error!(error = %e, "Failed writing narrative");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = report.articles.len(),
        overall = %report.analysis_result.overall_sentiment,
        "Execution complete"
    );

    Ok(())
}
