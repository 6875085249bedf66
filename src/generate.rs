//! Pipeline orchestration: dataset → index → plan → emitted site.
//!
//! [`build`] runs the whole pipeline for one config. Everything that can fail
//! without touching the output tree (config validation, dataset parsing,
//! reading the stylesheet) happens first; only then does the emitter wipe and
//! rewrite the output directory. [`check`] stops after indexing and writes
//! nothing.

use crate::config::{ConfigError, SiteConfig};
use crate::emit::{self, EmitError, OutputStats, Stylesheet};
use crate::event::{self, DatasetError};
use crate::i18n::Lang;
use crate::index::DayIndex;
use crate::plan::{self, PageKind, SitePlan};
use crate::types::BuildStamp;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// What normalization made of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetReport {
    pub data_file: PathBuf,
    pub target_year: i32,
    /// Records in the file.
    pub records: usize,
    /// Events that made it into the index, verified or not.
    pub kept: usize,
    pub verified: usize,
    pub malformed: usize,
    pub other_year: usize,
    /// Distinct days with at least one event.
    pub days: usize,
}

/// Pages generated for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePages {
    pub lang: Lang,
    pub months: usize,
    pub days: usize,
}

/// Everything a finished build reports back.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub dataset: DatasetReport,
    pub languages: Vec<LanguagePages>,
    pub pages: usize,
    pub sitemap_urls: usize,
    pub stylesheet_href: String,
    pub output_dir: PathBuf,
    pub output: OutputStats,
}

/// Load, normalize and index the configured dataset.
pub fn load_index(config: &SiteConfig) -> Result<(DayIndex, DatasetReport), GenerateError> {
    let records = event::load_dataset(&config.data_file)?;
    let normalized = event::normalize(&records, config.target_year);
    let verified = normalized.events.iter().filter(|e| e.verified).count();
    let kept = normalized.events.len();
    let (malformed, other_year) = (normalized.malformed, normalized.other_year);

    let index = DayIndex::build(normalized.events);
    let report = DatasetReport {
        data_file: config.data_file.clone(),
        target_year: config.target_year,
        records: records.len(),
        kept,
        verified,
        malformed,
        other_year,
        days: index.day_count(),
    };
    Ok((index, report))
}

/// Validate the config and dataset without writing anything.
pub fn check(config: &SiteConfig) -> Result<DatasetReport, GenerateError> {
    config.validate()?;
    let (_, report) = load_index(config)?;
    Ok(report)
}

/// Generate the complete site for `config`, stamping pages with `stamp`.
pub fn build(config: &SiteConfig, stamp: BuildStamp) -> Result<BuildSummary, GenerateError> {
    config.validate()?;
    let (index, dataset) = load_index(config)?;
    let stylesheet = Stylesheet::load(config)?;
    let plan = plan::plan_site(config);

    let report = emit::emit_site(config, &plan, &index, &stylesheet, stamp)?;
    let output = emit::output_stats(&config.output_dir)?;

    Ok(BuildSummary {
        dataset,
        languages: language_pages(config, &plan),
        pages: report.pages_written,
        sitemap_urls: report.sitemap.len(),
        stylesheet_href: stylesheet.href(),
        output_dir: config.output_dir.clone(),
        output,
    })
}

fn language_pages(config: &SiteConfig, plan: &SitePlan) -> Vec<LanguagePages> {
    config
        .languages
        .iter()
        .map(|&lang| {
            let count = |want: fn(&PageKind) -> bool| {
                plan.pages
                    .iter()
                    .filter(|p| p.lang() == Some(lang) && want(&p.kind))
                    .count()
            };
            LanguagePages {
                lang,
                months: count(|k| matches!(k, PageKind::Month { .. })),
                days: count(|k| matches!(k, PageKind::Day { .. })),
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{setup_site, stamp, write_dataset};
    use std::fs;

    const DATASET: &str = r#"[
        {"id": "a", "month": 3, "day": 8, "scope": "ua", "title": {"uk": "Тест"}, "verified": true},
        {"id": "b", "month": "3", "day": "8", "verified": false},
        {"id": "c", "year": 2025, "month": 1, "day": 1, "verified": true},
        {"id": "d", "month": 13, "day": 1},
        "not an object",
        {"id": "e", "year": 2026, "month": 12, "day": 25, "verified": true}
    ]"#;

    #[test]
    fn load_index_reports_counts() {
        let (_tmp, config) = setup_site(DATASET);
        let (index, report) = load_index(&config).unwrap();

        assert_eq!(report.records, 6);
        assert_eq!(report.kept, 3);
        assert_eq!(report.verified, 2);
        assert_eq!(report.malformed, 2);
        assert_eq!(report.other_year, 1);
        assert_eq!(report.days, 2);
        assert_eq!(index.lookup(3, 8).len(), 2);
    }

    #[test]
    fn check_writes_nothing() {
        let (_tmp, config) = setup_site(DATASET);
        let report = check(&config).unwrap();
        assert_eq!(report.kept, 3);
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn check_rejects_invalid_config() {
        let (_tmp, mut config) = setup_site(DATASET);
        config.site_url = "https://cal.test/".into();
        assert!(matches!(check(&config), Err(GenerateError::Config(_))));
    }

    #[test]
    fn build_summary() {
        let (_tmp, config) = setup_site(DATASET);
        let summary = build(&config, stamp()).unwrap();

        assert_eq!(summary.pages, 1 + 3 * (12 + 365 + 1));
        assert_eq!(summary.sitemap_urls, summary.pages);
        // pages + stylesheet + robots.txt + sitemap.xml
        assert_eq!(summary.output.files, summary.pages + 3);
        assert!(summary.output.bytes > 0);
        assert_eq!(summary.languages.len(), 3);
        assert_eq!(
            summary.languages[0],
            LanguagePages {
                lang: Lang::Uk,
                months: 12,
                days: 365
            }
        );
        assert!(summary.stylesheet_href.starts_with("/assets/style.css?v="));
    }

    #[test]
    fn build_in_leap_year() {
        let (_tmp, mut config) = setup_site("[]");
        config.target_year = 2028;
        config.languages = vec![Lang::En];
        let summary = build(&config, stamp()).unwrap();
        assert_eq!(summary.languages[0].days, 366);
        assert!(config.output_dir.join("en/2028/02/29/index.html").is_file());
    }

    #[test]
    fn bad_dataset_preserves_previous_output() {
        let (tmp, config) = setup_site(DATASET);
        build(&config, stamp()).unwrap();
        let page = config.output_dir.join("uk/2026/03/08/index.html");
        let before = fs::read_to_string(&page).unwrap();

        write_dataset(tmp.path(), "{ not json");
        let err = build(&config, stamp()).unwrap_err();
        assert!(matches!(err, GenerateError::Dataset(DatasetError::Json { .. })));
        assert_eq!(fs::read_to_string(&page).unwrap(), before);
    }

    #[test]
    fn non_array_dataset_is_rejected() {
        let (_tmp, config) = setup_site(r#"{"events": []}"#);
        let err = build(&config, stamp()).unwrap_err();
        assert!(matches!(err, GenerateError::Dataset(DatasetError::NotAnArray(_))));
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn output_dir_over_dataset_is_rejected_before_wiping() {
        let (tmp, mut config) = setup_site(DATASET);
        for output in [tmp.path().join("data"), tmp.path().to_path_buf()] {
            config.output_dir = output;
            let err = build(&config, stamp()).unwrap_err();
            assert!(matches!(err, GenerateError::Config(ConfigError::Validation(_))));
            assert!(config.data_file.is_file());
        }
        // The dataset is intact, so a corrected config still builds.
        config.output_dir = tmp.path().join("dist");
        assert!(build(&config, stamp()).is_ok());
    }

    #[test]
    fn write_failure_names_the_path() {
        let (tmp, mut config) = setup_site(DATASET);
        fs::write(tmp.path().join("blocker"), "a file, not a directory").unwrap();
        config.output_dir = tmp.path().join("blocker/dist");

        let err = build(&config, stamp()).unwrap_err();
        match &err {
            GenerateError::Emit(EmitError::Io { path, .. }) => {
                assert!(path.starts_with(tmp.path().join("blocker")));
            }
            other => panic!("expected an emit error, got {other:?}"),
        }
        assert!(err.to_string().contains("blocker"));
    }

    #[test]
    fn missing_stylesheet_preserves_previous_output() {
        let (tmp, mut config) = setup_site(DATASET);
        build(&config, stamp()).unwrap();

        config.style_source = Some(tmp.path().join("missing.css"));
        let err = build(&config, stamp()).unwrap_err();
        assert!(matches!(err, GenerateError::Emit(EmitError::Io { .. })));
        assert!(config.output_dir.join("today/index.html").is_file());
    }
}
