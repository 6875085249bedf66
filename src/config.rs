//! Site configuration module.
//!
//! Handles loading, validating, and layering `config.toml`. Stock defaults
//! form the base layer; a user `config.toml` overrides any subset of keys.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! target_year = 2026                  # The one year generated per run
//! site_url = "https://example.com"    # Absolute base URL, no trailing slash
//! data_file = "data/events.json"      # JSON array of event records
//! output_dir = "dist"                 # Wiped and regenerated on every build
//! languages = ["uk", "en", "tr"]      # First entry is the x-default language
//! # style_source = "style.css"        # Stylesheet to ship instead of the bundled one
//! ```
//!
//! Relative paths are resolved against the directory holding `config.toml`.
//! Unknown keys are rejected to catch typos early.
//!
//! `output_dir` is deleted at the start of every build, so it may not be,
//! or contain, the dataset, the stylesheet source or the config directory.

use crate::i18n::Lang;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Calendar year whose pages are generated.
    pub target_year: i32,
    /// Absolute site URL used in canonical links, hreflang and the sitemap.
    pub site_url: String,
    /// Event dataset (JSON array).
    pub data_file: PathBuf,
    /// Output directory; removed and recreated by every build.
    pub output_dir: PathBuf,
    /// Languages to generate, in site order.
    pub languages: Vec<Lang>,
    /// Stylesheet copied to `assets/style.css`. The bundled one when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_source: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            target_year: 2026,
            site_url: "https://example.com".to_string(),
            data_file: PathBuf::from("data/events.json"),
            output_dir: PathBuf::from("dist"),
            languages: Lang::ALL.to_vec(),
            style_source: None,
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=9999).contains(&self.target_year) {
            return Err(ConfigError::Validation(
                "target_year must be 1-9999".into(),
            ));
        }
        let url = &self.site_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site_url must start with http:// or https://".into(),
            ));
        }
        if url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site_url must not end with a slash".into(),
            ));
        }
        if url
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>' | '\\'))
        {
            return Err(ConfigError::Validation(
                "site_url must not contain whitespace, quotes, angle brackets or backslashes"
                    .into(),
            ));
        }
        if self.languages.is_empty() {
            return Err(ConfigError::Validation(
                "languages must not be empty".into(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.languages.iter().find(|l| !seen.insert(**l)) {
            return Err(ConfigError::Validation(format!(
                "languages lists '{dup}' more than once"
            )));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        self.ensure_output_spares(&self.data_file, "data_file")?;
        if let Some(style) = &self.style_source {
            self.ensure_output_spares(style, "style_source")?;
        }
        Ok(())
    }

    /// Reject an `output_dir` that is `protected` or one of its ancestors.
    ///
    /// Paths are compared lexically after making them absolute against the
    /// working directory; symlinks are not followed.
    pub fn ensure_output_spares(&self, protected: &Path, what: &str) -> Result<(), ConfigError> {
        let output = lexical_absolute(&self.output_dir)?;
        if lexical_absolute(protected)?.starts_with(&output) {
            return Err(ConfigError::Validation(format!(
                "output_dir {} is wiped on every build and would delete {what} {}",
                self.output_dir.display(),
                protected.display()
            )));
        }
        Ok(())
    }

    /// The language used for `x-default` alternates and redirect fallbacks.
    pub fn default_language(&self) -> Lang {
        self.languages.first().copied().unwrap_or(Lang::Uk)
    }

    /// Resolve relative paths against `base` (the config file's directory).
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.data_file = resolve(self.data_file);
        self.output_dir = resolve(self.output_dir);
        self.style_source = self.style_source.map(resolve);
        self
    }
}

/// `path` made absolute, with `.` and `..` folded away.
fn lexical_absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    let mut out = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// `SiteConfig::default()` as a TOML table: the layer a user file lands on.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Lay `overlay` over `base`.
///
/// Tables combine per key, recursing into nested tables. Anything else in
/// `overlay` (including `languages` arrays) wins outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    use toml::Value::Table;
    match (base, overlay) {
        (Table(mut merged), Table(overlay)) => {
            for (key, value) in overlay {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            Table(merged)
        }
        (_, overlay) => overlay,
    }
}

/// Parse `config_path` without interpreting it. `None` when there is no file.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Deserialize the stock layer with the user layer on top.
///
/// Unknown keys fail here. Values are checked by [`SiteConfig::validate`]
/// once paths are resolved.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let layered = match overlay {
        Some(user) => merge_toml(base, user),
        None => base,
    };
    Ok(layered.try_into()?)
}

/// Load the config file at `config_path`.
///
/// Resolves relative paths against the file's directory, then validates,
/// including that `output_dir` does not cover the config directory. A
/// missing file yields the stock defaults.
pub fn load_config(config_path: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(config_path)?;
    let base_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let config = resolve_config(stock_defaults_value(), overlay)?.resolve_paths(base_dir);
    config.validate()?;
    config.ensure_output_spares(base_dir, "the config directory")?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# daypages configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Relative paths are resolved against the directory holding this file.
# Unknown keys will cause an error.

# Calendar year to generate. Events with a different year are skipped;
# events without a year recur and appear in every generated year.
target_year = 2026

# Absolute site URL, without a trailing slash. Used for canonical links,
# hreflang alternates, robots.txt and sitemap.xml.
site_url = "https://example.com"

# Event dataset: a JSON array of event records.
data_file = "data/events.json"

# Output directory. It is deleted and regenerated on every build.
output_dir = "dist"

# Languages to generate, in site order. The first one is the x-default
# language and the fallback of the "today" redirect.
# Supported: "uk", "en", "tr".
languages = ["uk", "en", "tr"]

# Stylesheet shipped as assets/style.css. Omit to use the bundled one.
# style_source = "style.css"
"##
}
