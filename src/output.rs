//! CLI output formatting.
//!
//! This is the crate's only logging surface. Every command reports what it
//! did as plain lines on stdout; errors go to stderr from `main`.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Dataset data/events.json
//!     Records: 1204
//!     Kept for 2026: 1190 (1102 verified)
//!     Dropped: 9 malformed, 5 other year
//!     Indexed days: 366
//! ```
//!
//! ## Build
//!
//! ```text
//! Dataset data/events.json
//!     ...
//!
//! Pages
//!     uk: 12 months, 365 days → /uk/
//!     en: 12 months, 365 days → /en/
//!     /today/ → language redirect
//!
//! Assets
//!     /assets/style.css?v=3f2a9c01de
//!     robots.txt
//!     sitemap.xml (1132 URLs)
//!
//! Generated 1132 pages, 1135 files (4.1 MB) → dist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{BuildSummary, DatasetReport};
use crate::plan;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable byte count with one decimal.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the dataset section shared by `check` and `build`.
pub fn format_check_output(report: &DatasetReport) -> Vec<String> {
    let i = indent(1);
    vec![
        format!("Dataset {}", report.data_file.display()),
        format!("{i}Records: {}", report.records),
        format!(
            "{i}Kept for {}: {} ({} verified)",
            report.target_year, report.kept, report.verified
        ),
        format!(
            "{i}Dropped: {} malformed, {} other year",
            report.malformed, report.other_year
        ),
        format!("{i}Indexed days: {}", report.days),
    ]
}

pub fn print_check_output(report: &DatasetReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let i = indent(1);
    let mut lines = format_check_output(&summary.dataset);

    lines.push(String::new());
    lines.push("Pages".to_string());
    for lang in &summary.languages {
        lines.push(format!(
            "{i}{}: {} months, {} days \u{2192} {}",
            lang.lang,
            lang.months,
            lang.days,
            plan::lang_root_path(lang.lang)
        ));
    }
    lines.push(format!("{i}{} \u{2192} language redirect", plan::TODAY_PATH));

    lines.push(String::new());
    lines.push("Assets".to_string());
    lines.push(format!("{i}{}", summary.stylesheet_href));
    lines.push(format!("{i}robots.txt"));
    lines.push(format!("{i}sitemap.xml ({} URLs)", summary.sitemap_urls));

    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages, {} files ({}) \u{2192} {}",
        summary.pages,
        summary.output.files,
        format_bytes(summary.output.bytes),
        summary.output_dir.display()
    ));
    lines
}

pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
