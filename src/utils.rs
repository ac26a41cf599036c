//! Utility functions for rounding, number display, string manipulation, time
//! classification, and file system checks.
//!
//! This module provides helpers used throughout the crate:
//! - Fixed-precision rounding for the aggregate statistics
//! - Number rendering for the human-readable summaries
//! - Slugification and truncation for file names and logs
//! - Edition naming and output directory validation for the binary

use chrono::{Local, NaiveTime};
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

use crate::error::Result;

/// Round `value` to `decimals` decimal places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    // `+ 0.0` turns a negative zero into 0.0 so it never prints as "-0.0".
    (value * factor).round() / factor + 0.0
}

/// Render a float the way it was stored: shortest representation, but always
/// with a fractional part (`33.3`, `0.0`, `100.0`, `-0.25`).
///
/// Summaries print values exactly as they sit in the analysis result; this
/// never re-rounds.
pub fn display_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes (backed off to a char boundary)
/// with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…(+{} bytes)", &s[..end], s.len() - end)
    }
}

/// Convert a title or company name to a file-name-friendly slug.
///
/// Lowercases the text, removes special characters, and replaces spaces with
/// hyphens.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify_title("Hello World"), "hello-world");
/// assert_eq!(slugify_title("Test-Article!"), "test-article");
/// ```
pub fn slugify_title(title: &str) -> String {
    title
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .replace(' ', "-")
}

/// Capitalize the first character of a string.
pub fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Classify a wall-clock time into a report edition.
///
/// # Arguments
///
/// * `tod` - Local wall-clock time.
///
/// # Returns
///
/// `"morning"` before 08:00, `"afternoon"` before 16:00, and `"evening"`
/// otherwise.
pub fn classify_time_of_day(tod: NaiveTime) -> &'static str {
    let morning_high = NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default();
    let afternoon_high = NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default();

    if tod < morning_high {
        "morning"
    } else if tod < afternoon_high {
        "afternoon"
    } else {
        "evening"
    }
}

/// Classify the current local time; used to name report files per edition.
#[instrument]
pub fn time_of_day() -> String {
    let tod = Local::now().time();
    let which = classify_time_of_day(tod);
    tracing::debug!(%tod, %which, "Computed time_of_day");
    which.to_string()
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then creates and immediately
/// deletes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<()> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
