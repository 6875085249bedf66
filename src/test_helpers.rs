//! Shared test utilities.
//!
//! Builders for the values most unit tests need: a minimal verified event,
//! a fixed build stamp, and a config pointing at a test domain.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut e = event("womens-day", 3, 8);
//! e.scope = "ua".into();
//! let index = DayIndex::build(vec![e]);
//! ```

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::event::Event;
use crate::types::BuildStamp;

/// A verified global event on `(month, day)` titled `id` in English.
pub fn event(id: &str, month: u32, day: u32) -> Event {
    Event {
        id: Some(id.to_string()),
        year: None,
        month,
        day,
        scope: "global".to_string(),
        kind: "other".to_string(),
        title: [("en".to_string(), id.to_string())].into_iter().collect(),
        description: Default::default(),
        tags: Vec::new(),
        sources: Vec::new(),
        verified: true,
    }
}

/// Fixed stamp: 2026-01-15.
pub fn stamp() -> BuildStamp {
    BuildStamp(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap())
}

/// Defaults with `site_url` set to `https://cal.test`.
pub fn test_config() -> SiteConfig {
    SiteConfig {
        site_url: "https://cal.test".to_string(),
        ..SiteConfig::default()
    }
}

/// A temp directory holding `data/events.json` with `json`, plus a config
/// whose paths point into it.
pub fn setup_site(json: &str) -> (TempDir, SiteConfig) {
    let tmp = TempDir::new().unwrap();
    write_dataset(tmp.path(), json);
    let config = SiteConfig {
        data_file: tmp.path().join("data/events.json"),
        output_dir: tmp.path().join("dist"),
        ..test_config()
    };
    (tmp, config)
}

/// Overwrite `data/events.json` under `root`.
pub fn write_dataset(root: &Path, json: &str) {
    fs::create_dir_all(root.join("data")).unwrap();
    fs::write(root.join("data/events.json"), json).unwrap();
}
