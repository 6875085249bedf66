//! # daypages
//!
//! A static site generator for a per-day "events & holidays" calendar in
//! Ukrainian, English and Turkish. One JSON dataset in, a complete crawlable
//! site out: a page for every language and calendar day of the target year,
//! a page for every month, and the redirect and crawler files around them.
//!
//! # Architecture: One Index, Many Pages
//!
//! ```text
//! data/events.json ─→ event::normalize ─→ DayIndex ─┐
//!                                                   ├─→ render ─→ emit ─→ dist/
//! config.toml ──────────────────────→ plan_site ────┘
//! ```
//!
//! The dataset is parsed and indexed once per run. The planner enumerates
//! every page from the config alone; the renderer looks each page's events up
//! in the index. Nothing is incremental: every build regenerates the whole
//! tree from scratch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Layered `config.toml` loading (stock defaults ← user file) and validation |
//! | [`i18n`] | Supported languages, UI strings, month/weekday names, date labels |
//! | [`calendar`] | Days-in-month and previous/next day and month |
//! | [`event`] | Dataset loading and record normalization into [`event::Event`] |
//! | [`index`] | [`index::DayIndex`] keyed by `(month, day)`, and same-day ordering |
//! | [`plan`] | Every page to emit, with URLs, navigation and hreflang alternates |
//! | [`render`] | Maud templates: planned page → HTML |
//! | [`emit`] | Output tree, fingerprinted stylesheet, `robots.txt`, `sitemap.xml` |
//! | [`generate`] | Orchestrates the pipeline and returns a build summary |
//! | [`types`] | Shared types (`BuildStamp`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Recurring Events
//!
//! A record without a year applies to every year, so a single dataset serves
//! any target year. Records with a year only appear when it matches.
//!
//! ## Verified Only
//!
//! Unverified records are indexed (they count in `check`) but never rendered
//! and never mark a day on a month page.
//!
//! ## Parse Before Wipe
//!
//! The output directory is removed at the start of emission. Dataset parsing
//! and stylesheet loading both happen earlier, so a broken input leaves the
//! last good site in place.
//!
//! ## Frozen Build Stamp
//!
//! The "updated" date on each page is passed in as a [`types::BuildStamp`].
//! Two builds with the same stamp produce byte-identical trees.

pub mod calendar;
pub mod config;
pub mod emit;
pub mod event;
pub mod generate;
pub mod i18n;
pub mod index;
pub mod output;
pub mod plan;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
