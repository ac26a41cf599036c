//! Candidate sources for the analysis pipeline.
//!
//! # Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Google News | [`google_news`] | RSS search | Live; retried with backoff |
//! | Fallback | [`fallback`] | Synthetic | Deterministic, pre-labeled |
//!
//! [`collect_articles`] always returns exactly `n` articles: live results
//! first, topped up from the fallback generator when live retrieval fails
//! or comes up short.

pub mod fallback;
pub mod google_news;

use tracing::{error, info, instrument, warn};

use crate::config::AppConfig;
use crate::models::Article;

/// Fill `articles` up to `n` with fallback articles, then cap at `n`.
pub fn top_up(company: &str, mut articles: Vec<Article>, n: usize) -> Vec<Article> {
    if articles.len() < n {
        let missing = n - articles.len();
        warn!(have = articles.len(), missing, "Not enough live articles; using fallback source");
        articles.extend(fallback::generate(company, missing));
    }
    articles.truncate(n);
    articles
}

/// Gather `n` unscored (live) or pre-labeled (fallback) articles about
/// `company`.
///
/// # Arguments
///
/// * `company` - Search subject.
/// * `n` - Exact number of articles to return.
/// * `config` - Feed locale and fetch retry settings.
/// * `offline` - Skip live retrieval entirely.
///
/// # Returns
///
/// Live results first, topped up from the synthetic generator when retrieval
/// fails or comes up short. Never errors.
#[instrument(level = "info", skip_all, fields(company = %company, n = n, offline = offline))]
pub async fn collect_articles(company: &str, n: usize, config: &AppConfig, offline: bool) -> Vec<Article> {
    let live: Vec<Article> = if offline {
        info!("Offline run; skipping live retrieval");
        Vec::new()
    } else {
        match google_news::search(company, n, config).await {
            Ok(candidates) => candidates.into_iter().map(Article::from).collect(),
            Err(e) => {
                error!(error = %e, "Error searching Google News; falling back");
                Vec::new()
            }
        }
    };

    let live_count = live.len();
    let articles = top_up(company, live, n);
    info!(live = live_count, total = articles.len(), "Collected articles");
    articles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(title: &str) -> Article {
        Article::new(title, "summary", "https://example.com", "Wire", None)
    }

    #[test]
    fn test_top_up_fills_missing() {
        let articles = top_up("Acme", vec![live("Live one")], 3);
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "Live one");
        assert!(!articles[0].is_scored());
        assert_eq!(articles[1].title, "Acme Announces New Product Line");
        assert!(articles[1].is_scored());
    }

    #[test]
    fn test_top_up_truncates() {
        let articles = top_up("Acme", (0..5).map(|i| live(&format!("t{i}"))).collect(), 2);
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["t0", "t1"]);
    }

    #[tokio::test]
    async fn test_offline_collect_uses_fallback_only() {
        let articles = collect_articles("Acme", 4, &AppConfig::default(), true).await;
        assert_eq!(articles, fallback::generate("Acme", 4));
    }
}
