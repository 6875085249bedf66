//! End-to-end builds through the library API.
//!
//! Each test writes a dataset into a temp directory, runs
//! `generate::build` with a fixed stamp and inspects the emitted tree.

use chrono::NaiveDate;
use daypages::config::SiteConfig;
use daypages::generate;
use daypages::i18n::Lang;
use daypages::types::BuildStamp;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

const WOMENS_DAY: &str = r#"[
  {
    "month": 3,
    "day": 8,
    "scope": "ua",
    "title": {"uk": "Тест"},
    "tags": ["x"],
    "verified": true
  }
]"#;

fn stamp() -> BuildStamp {
    BuildStamp(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap())
}

fn site(root: &Path, dataset: &str, out: &str) -> SiteConfig {
    fs::create_dir_all(root.join("data")).unwrap();
    fs::write(root.join("data/events.json"), dataset).unwrap();
    SiteConfig {
        site_url: "https://days.example".into(),
        data_file: root.join("data/events.json"),
        output_dir: root.join(out),
        ..SiteConfig::default()
    }
}

fn read(config: &SiteConfig, rel: &str) -> String {
    fs::read_to_string(config.output_dir.join(rel)).unwrap()
}

/// Relative path → contents for every file under `dir`.
fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(dir)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(dir).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

#[test]
fn recurring_event_lands_on_its_day() {
    let tmp = TempDir::new().unwrap();
    let config = site(tmp.path(), WOMENS_DAY, "dist");
    generate::build(&config, stamp()).unwrap();

    let day = read(&config, "uk/2026/03/08/index.html");
    assert_eq!(day.matches(r#"<article class="event">"#).count(), 1);
    assert!(day.contains("🇺🇦 Тест"));
    assert!(day.contains("Теги:</strong> x"));
    assert!(day.contains("Оновлено: 2026-02-01"));

    let next = read(&config, "uk/2026/03/09/index.html");
    assert!(!next.contains("<article"));

    // No English title: falls back to Ukrainian.
    let en = read(&config, "en/2026/03/08/index.html");
    assert!(en.contains("🇺🇦 Тест"));
}

#[test]
fn month_page_marks_only_the_event_day() {
    let tmp = TempDir::new().unwrap();
    let config = site(tmp.path(), WOMENS_DAY, "dist");
    generate::build(&config, stamp()).unwrap();

    let month = read(&config, "uk/2026/03/index.html");
    assert_eq!(month.matches("has-events").count(), 1);
    let link = month.find(r#"href="/uk/2026/03/08/""#).unwrap();
    let tag_start = month[..link].rfind('<').unwrap();
    assert!(month[tag_start..link].contains("has-events"));

    let april = read(&config, "uk/2026/04/index.html");
    assert!(!april.contains("has-events"));
}

#[test]
fn sitemap_and_robots() {
    let tmp = TempDir::new().unwrap();
    let config = site(tmp.path(), WOMENS_DAY, "dist");
    let summary = generate::build(&config, stamp()).unwrap();

    let sitemap = read(&config, "sitemap.xml");
    assert!(sitemap.contains("<loc>https://days.example/uk/2026/03/08/</loc>"));
    assert!(sitemap.contains("<loc>https://days.example/today/</loc>"));
    assert!(sitemap.contains("<loc>https://days.example/tr/</loc>"));
    assert_eq!(sitemap.matches("<url>").count(), summary.sitemap_urls);

    // Emission order: today, then each language's months and days, then its root.
    let today = sitemap.find("/today/").unwrap();
    let uk_jan = sitemap.find("/uk/2026/01/</loc>").unwrap();
    let uk_root = sitemap.find("days.example/uk/</loc>").unwrap();
    let en_jan = sitemap.find("/en/2026/01/</loc>").unwrap();
    assert!(today < uk_jan && uk_jan < uk_root && uk_root < en_jan);

    assert_eq!(
        read(&config, "robots.txt"),
        "User-agent: *\nAllow: /\n\nSitemap: https://days.example/sitemap.xml\n"
    );
}

#[test]
fn unverified_and_other_year_events_are_hidden() {
    let dataset = r#"[
        {"month": 5, "day": 1, "title": {"en": "Draft"}},
        {"month": 5, "day": 2, "year": 2025, "title": {"en": "Last year"}, "verified": true},
        {"month": 5, "day": 3, "year": 2026, "title": {"en": "This year"}, "verified": true}
    ]"#;
    let tmp = TempDir::new().unwrap();
    let config = site(tmp.path(), dataset, "dist");
    let summary = generate::build(&config, stamp()).unwrap();

    assert_eq!(summary.dataset.kept, 2);
    assert_eq!(summary.dataset.other_year, 1);
    assert!(!read(&config, "en/2026/05/01/index.html").contains("Draft"));
    assert!(!read(&config, "en/2026/05/02/index.html").contains("Last year"));
    let this_year = read(&config, "en/2026/05/03/index.html");
    assert!(this_year.contains("This year"));
    assert!(this_year.contains("(2026)"));

    let month = read(&config, "en/2026/05/index.html");
    assert_eq!(month.matches("has-events").count(), 1);
}

#[test]
fn same_stamp_gives_identical_trees() {
    let tmp = TempDir::new().unwrap();
    let first = site(tmp.path(), WOMENS_DAY, "first");
    let second = SiteConfig {
        output_dir: tmp.path().join("second"),
        ..first.clone()
    };
    generate::build(&first, stamp()).unwrap();
    generate::build(&second, stamp()).unwrap();

    let a = snapshot(&first.output_dir);
    let b = snapshot(&second.output_dir);
    assert_eq!(a.len(), b.len());
    assert!(a == b, "outputs differ");
}

#[test]
fn rebuild_overwrites_previous_tree() {
    let tmp = TempDir::new().unwrap();
    let config = site(tmp.path(), WOMENS_DAY, "dist");
    generate::build(&config, stamp()).unwrap();

    let narrowed = SiteConfig {
        languages: vec![Lang::Tr],
        ..config.clone()
    };
    generate::build(&narrowed, stamp()).unwrap();

    assert!(!config.output_dir.join("uk").exists());
    assert!(config.output_dir.join("tr/2026/03/08/index.html").is_file());
    let redirect = read(&config, "today/index.html");
    assert!(redirect.contains(r#"var allowed = ["tr"];"#));
}

#[test]
fn custom_stylesheet_is_copied_and_fingerprinted() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("theme.css"), "body { color: teal; }").unwrap();
    let config = SiteConfig {
        style_source: Some(tmp.path().join("theme.css")),
        ..site(tmp.path(), "[]", "dist")
    };
    let summary = generate::build(&config, stamp()).unwrap();

    assert_eq!(read(&config, "assets/style.css"), "body { color: teal; }");
    let page = read(&config, "uk/2026/01/01/index.html");
    assert!(page.contains(&format!(r#"href="{}""#, summary.stylesheet_href)));
}
