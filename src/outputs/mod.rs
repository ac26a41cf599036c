//! Report writers for JSON, Markdown, and index files.
//!
//! # Submodules
//!
//! - [`json`]: the full report, chart series, and filtered results as JSON
//! - [`markdown`]: the detailed report and the speech narrative for reading
//! - [`indexes`]: the append-only `reports.md` index
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── acme_morning.json
//!     ├── acme_morning_charts.json
//!     └── acme_morning_filtered.json
//!
//! markdown_output_dir/
//! ├── acme_2025-05-06_morning.md
//! ├── acme_2025-05-06_morning_narrative.txt
//! └── reports.md
//! ```

pub mod indexes;
pub mod json;
pub mod markdown;

use chrono::Local;

use crate::utils::{slugify_title, time_of_day};

/// Names one run's output files: company, local date, and time of day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edition {
    pub company_slug: String,
    /// `%Y-%m-%d`.
    pub date: String,
    pub time_of_day: String,
}

impl Edition {
    pub fn new(company: &str, date: impl Into<String>, time_of_day: impl Into<String>) -> Self {
        Self {
            company_slug: slugify_title(company.trim()),
            date: date.into(),
            time_of_day: time_of_day.into(),
        }
    }

    /// The edition for a run starting now.
    pub fn now(company: &str) -> Self {
        Self::new(company, Local::now().date_naive().to_string(), time_of_day())
    }

    /// `<slug>_<time_of_day>`, the stem of the JSON files.
    pub fn json_stem(&self) -> String {
        format!("{}_{}", self.company_slug, self.time_of_day)
    }

    /// `<slug>_<date>_<time_of_day>`, the stem of the Markdown-side files.
    pub fn markdown_stem(&self) -> String {
        format!("{}_{}_{}", self.company_slug, self.date, self.time_of_day)
    }
}
