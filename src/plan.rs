//! Page planning: what to emit, where, and how pages link to each other.
//!
//! The planner is pure. Given the config it enumerates every page of the
//! site as a [`PlannedPage`] carrying its URL path, its navigation hrefs and
//! its equivalents in the other languages. It does not look at events; the
//! renderer pairs each planned page with the index.
//!
//! ## URL Scheme
//!
//! ```text
//! /today/              language-detecting redirect to today's day page
//! /{lang}/             language root → redirects to /today/
//! /{lang}/{Y}/{MM}/    month page
//! /{lang}/{Y}/{MM}/{DD}/  day page
//! ```
//!
//! Every URL is a directory; the page itself is written as `index.html`
//! inside it.
//!
//! ## Plan Order
//!
//! The today redirect comes first. Then, per language in configured order,
//! each month page followed by its day pages, and finally the language
//! root. The sitemap lists URLs in this order.

use crate::calendar::{self, YearMonth};
use crate::config::SiteConfig;
use crate::i18n::Lang;
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

/// Path of the language-detecting "today" redirect.
pub const TODAY_PATH: &str = "/today/";

/// URL path of a day page.
pub fn day_path(lang: Lang, date: NaiveDate) -> String {
    day_path_ymd(lang, date.year(), date.month(), date.day())
}

/// URL path of a day page from its parts.
pub fn day_path_ymd(lang: Lang, year: i32, month: u32, day: u32) -> String {
    format!("/{}/{}/{:02}/{:02}/", lang.code(), year, month, day)
}

/// URL path of a month page.
pub fn month_path(lang: Lang, ym: YearMonth) -> String {
    format!("/{}/{}/{:02}/", lang.code(), ym.year, ym.month)
}

/// URL path of a language root.
pub fn lang_root_path(lang: Lang) -> String {
    format!("/{}/", lang.code())
}

/// File a page with URL `path` is written to under `output_dir`.
pub fn output_file(output_dir: &Path, path: &str) -> PathBuf {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .fold(output_dir.to_path_buf(), |dir, segment| dir.join(segment))
        .join("index.html")
}

/// Previous/next links of a day or month page. Site-relative paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub prev: String,
    pub next: String,
}

/// What a page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PageKind {
    Day {
        lang: Lang,
        date: NaiveDate,
        nav: Navigation,
        /// Back-to-month link.
        month_href: String,
    },
    Month {
        lang: Lang,
        month: YearMonth,
        days_in_month: u32,
        nav: Navigation,
    },
    /// Language-detecting redirect to today's day page.
    TodayRedirect,
    /// `/{lang}/`, forwarding to the today redirect.
    LangRoot { lang: Lang },
}

/// The same page in another language.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternate {
    pub lang: Lang,
    /// Absolute URL.
    pub href: String,
}

/// One page of the site.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPage {
    pub kind: PageKind,
    /// Site-relative URL path, always with leading and trailing slash.
    pub path: String,
    /// Absolute URL of this page.
    pub url: String,
    /// Equivalent pages in every configured language, in configured order.
    pub alternates: Vec<Alternate>,
    /// Absolute URL of the today redirect.
    pub today_href: String,
}

impl PlannedPage {
    /// `None` for the language-independent today redirect.
    pub fn lang(&self) -> Option<Lang> {
        match &self.kind {
            PageKind::Day { lang, .. } | PageKind::Month { lang, .. } | PageKind::LangRoot { lang } => {
                Some(*lang)
            }
            PageKind::TodayRedirect => None,
        }
    }

    /// The alternate to use as `hreflang="x-default"`.
    pub fn x_default(&self) -> Option<&Alternate> {
        self.alternates.first()
    }

    /// Whether search engines should index this page.
    pub fn indexable(&self) -> bool {
        matches!(self.kind, PageKind::Day { .. } | PageKind::Month { .. })
    }
}

/// All pages of one build, in emission order.
#[derive(Debug)]
pub struct SitePlan {
    pub pages: Vec<PlannedPage>,
}

impl SitePlan {
    pub fn day_pages(&self) -> impl Iterator<Item = &PlannedPage> {
        self.pages
            .iter()
            .filter(|p| matches!(p.kind, PageKind::Day { .. }))
    }

    pub fn month_pages(&self) -> impl Iterator<Item = &PlannedPage> {
        self.pages
            .iter()
            .filter(|p| matches!(p.kind, PageKind::Month { .. }))
    }
}

/// Builds pages for one config.
struct Planner<'a> {
    config: &'a SiteConfig,
    today_href: String,
}

impl Planner<'_> {
    fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.config.site_url, path)
    }

    fn alternates(&self, path_for: impl Fn(Lang) -> String) -> Vec<Alternate> {
        self.config
            .languages
            .iter()
            .map(|&lang| Alternate {
                lang,
                href: self.absolute(&path_for(lang)),
            })
            .collect()
    }

    fn page(&self, kind: PageKind, path: String, alternates: Vec<Alternate>) -> PlannedPage {
        PlannedPage {
            kind,
            url: self.absolute(&path),
            path,
            alternates,
            today_href: self.today_href.clone(),
        }
    }

    fn today_redirect(&self) -> PlannedPage {
        self.page(PageKind::TodayRedirect, TODAY_PATH.to_string(), Vec::new())
    }

    fn lang_root(&self, lang: Lang) -> PlannedPage {
        let alternates = self.alternates(lang_root_path);
        self.page(PageKind::LangRoot { lang }, lang_root_path(lang), alternates)
    }

    fn month(&self, lang: Lang, ym: YearMonth) -> PlannedPage {
        let kind = PageKind::Month {
            lang,
            month: ym,
            days_in_month: calendar::days_in_month(ym.year, ym.month),
            nav: Navigation {
                prev: month_path(lang, ym.previous()),
                next: month_path(lang, ym.next()),
            },
        };
        let alternates = self.alternates(|l| month_path(l, ym));
        self.page(kind, month_path(lang, ym), alternates)
    }

    fn day(&self, lang: Lang, date: NaiveDate) -> PlannedPage {
        let kind = PageKind::Day {
            lang,
            date,
            nav: Navigation {
                prev: day_path(lang, calendar::previous_day(date)),
                next: day_path(lang, calendar::next_day(date)),
            },
            month_href: month_path(lang, YearMonth::new(date.year(), date.month())),
        };
        let alternates = self.alternates(|l| day_path(l, date));
        self.page(kind, day_path(lang, date), alternates)
    }
}

/// Enumerate every page for the configured year and languages.
pub fn plan_site(config: &SiteConfig) -> SitePlan {
    let planner = Planner {
        config,
        today_href: format!("{}{}", config.site_url, TODAY_PATH),
    };
    let year = config.target_year;

    let mut pages = vec![planner.today_redirect()];
    for &lang in &config.languages {
        for month in 1..=12 {
            let ym = YearMonth::new(year, month);
            pages.push(planner.month(lang, ym));
            pages.extend(calendar::month_dates(year, month).map(|date| planner.day(lang, date)));
        }
        pages.push(planner.lang_root(lang));
    }
    SitePlan { pages }
}
