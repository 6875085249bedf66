//! Writing the planned site to disk.
//!
//! The emitter is the only stage that touches the output tree. It wipes the
//! previous tree, writes the stylesheet and every planned page, then the
//! crawler files. Everything it needs is computed before it starts: the
//! dataset has been parsed and the stylesheet read, so a failure in those
//! steps never reaches [`emit_site`] and the old tree survives.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── assets/style.css
//! ├── today/index.html
//! ├── uk/
//! │   ├── index.html
//! │   └── 2026/
//! │       ├── 03/index.html           # month page
//! │       └── 03/08/index.html        # day page
//! ├── en/ ...
//! ├── robots.txt
//! └── sitemap.xml
//! ```
//!
//! ## Fingerprinting
//!
//! The stylesheet is linked as `/assets/style.css?v=<hash>` where `<hash>`
//! is a prefix of the SHA-256 of its bytes, so browsers refetch it exactly
//! when it changes.

use crate::config::SiteConfig;
use crate::index::DayIndex;
use crate::plan::{self, SitePlan};
use crate::render::{self, RenderContext};
use crate::types::BuildStamp;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Site-relative path of the stylesheet, without fingerprint.
pub const STYLESHEET_PATH: &str = "/assets/style.css";

const BUNDLED_CSS: &str = include_str!("../static/style.css");

/// Hex digits of the SHA-256 kept as the fingerprint.
const FINGERPRINT_LEN: usize = 10;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EmitError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| EmitError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ============================================================================
// Stylesheet
// ============================================================================

/// Stylesheet contents and their fingerprint.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    contents: Vec<u8>,
    fingerprint: String,
}

impl Stylesheet {
    fn new(contents: Vec<u8>) -> Self {
        let digest = format!("{:x}", Sha256::digest(&contents));
        Self {
            fingerprint: digest[..FINGERPRINT_LEN].to_string(),
            contents,
        }
    }

    /// The stylesheet compiled into the binary.
    pub fn bundled() -> Self {
        Self::new(BUNDLED_CSS.as_bytes().to_vec())
    }

    pub fn from_file(path: &Path) -> Result<Self, EmitError> {
        let contents = fs::read(path).map_err(EmitError::io(path))?;
        Ok(Self::new(contents))
    }

    /// The configured `style_source`, or the bundled stylesheet.
    pub fn load(config: &SiteConfig) -> Result<Self, EmitError> {
        match &config.style_source {
            Some(path) => Self::from_file(path),
            None => Ok(Self::bundled()),
        }
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Link target used in every page head.
    pub fn href(&self) -> String {
        format!("{}?v={}", STYLESHEET_PATH, self.fingerprint)
    }
}

// ============================================================================
// Crawler files
// ============================================================================

/// Absolute URLs of every emitted page, in emission order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sitemap {
    urls: Vec<String>,
}

impl Sitemap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, url: impl Into<String>) {
        self.urls.push(url.into());
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Flat `<urlset>` document.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for url in &self.urls {
            xml.push_str("  <url><loc>");
            xml.push_str(&xml_escape(url));
            xml.push_str("</loc></url>\n");
        }
        xml.push_str("</urlset>\n");
        xml
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn robots_txt(site_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {site_url}/sitemap.xml\n")
}

// ============================================================================
// Emission
// ============================================================================

/// What one emission wrote.
#[derive(Debug)]
pub struct EmitReport {
    pub pages_written: usize,
    pub sitemap: Sitemap,
}

/// Files and bytes under an output tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputStats {
    pub files: usize,
    pub bytes: u64,
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), EmitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(EmitError::io(parent))?;
    }
    fs::write(path, contents).map_err(EmitError::io(path))
}

/// Remove `output_dir` if present and recreate it empty.
pub fn clean_output(output_dir: &Path) -> Result<(), EmitError> {
    if output_dir.exists() {
        fs::remove_dir_all(output_dir).map_err(EmitError::io(output_dir))?;
    }
    fs::create_dir_all(output_dir).map_err(EmitError::io(output_dir))
}

/// Write the whole site for `plan` into `config.output_dir`.
pub fn emit_site(
    config: &SiteConfig,
    plan: &SitePlan,
    index: &DayIndex,
    stylesheet: &Stylesheet,
    stamp: BuildStamp,
) -> Result<EmitReport, EmitError> {
    let output_dir = &config.output_dir;
    clean_output(output_dir)?;

    write_file(
        &output_dir.join(STYLESHEET_PATH.trim_start_matches('/')),
        &stylesheet.contents,
    )?;

    let href = stylesheet.href();
    let ctx = RenderContext {
        config,
        stylesheet_href: &href,
        stamp,
    };

    let mut sitemap = Sitemap::new();
    for page in &plan.pages {
        let html = render::render_page(&ctx, page, index).into_string();
        write_file(&plan::output_file(output_dir, &page.path), html.as_bytes())?;
        sitemap.push(page.url.as_str());
    }

    write_file(
        &output_dir.join("robots.txt"),
        robots_txt(&config.site_url).as_bytes(),
    )?;
    write_file(&output_dir.join("sitemap.xml"), sitemap.to_xml().as_bytes())?;

    Ok(EmitReport {
        pages_written: plan.pages.len(),
        sitemap,
    })
}

/// Count files and their total size under `dir`.
pub fn output_stats(dir: &Path) -> Result<OutputStats, EmitError> {
    let mut stats = OutputStats::default();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| EmitError::Io {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_file() {
            let meta = entry.metadata().map_err(|e| EmitError::Io {
                path: entry.path().to_path_buf(),
                source: e.into(),
            })?;
            stats.files += 1;
            stats.bytes += meta.len();
        }
    }
    Ok(stats)
}

// ============================================================================
// Tests
// ============================================================================
