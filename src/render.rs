//! HTML rendering of planned pages.
//!
//! Every function here is pure: a [`PlannedPage`] plus the [`DayIndex`] in,
//! a [`Markup`] out. Writing files is the emitter's job.
//!
//! ## Page Kinds
//!
//! - **Day page**: date heading, event cards ordered by [`order`], link back
//!   to the month.
//! - **Month page**: one cell per day, days with events marked.
//! - **Today redirect**: `noindex` page whose inline script picks a language
//!   and forwards to the viewer's current date. Without JS, a link to the
//!   default language's January page.
//! - **Language root**: `noindex` meta-refresh to the today redirect.
//!
//! ## Escaping
//!
//! Event text comes from a dataset file and is treated as untrusted. It is
//! only ever interpolated through maud's `( )` splices, which escape `&`,
//! `<`, `>` and `"`. [`PreEscaped`] is reserved for the redirect script,
//! whose dynamic parts are JSON-encoded.

use crate::calendar::YearMonth;
use crate::config::SiteConfig;
use crate::event::Event;
use crate::i18n::{self, Lang};
use crate::index::{DayIndex, order};
use crate::plan::{self, Navigation, PageKind, PlannedPage};
use crate::types::BuildStamp;
use chrono::{Datelike, NaiveDate};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Everything besides the page itself that rendering depends on.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a SiteConfig,
    /// Site-relative stylesheet URL, including its fingerprint.
    pub stylesheet_href: &'a str,
    pub stamp: BuildStamp,
}

/// Render one planned page.
pub fn render_page(ctx: &RenderContext, page: &PlannedPage, index: &DayIndex) -> Markup {
    match &page.kind {
        PageKind::Day {
            lang,
            date,
            nav,
            month_href,
        } => render_day_page(ctx, page, *lang, *date, nav, month_href, index),
        PageKind::Month {
            lang,
            month,
            days_in_month,
            nav,
        } => render_month_page(ctx, page, *lang, *month, *days_in_month, nav, index),
        PageKind::TodayRedirect => render_today_redirect(ctx.config),
        PageKind::LangRoot { lang } => render_lang_root(page, *lang),
    }
}

/// Flag shown in front of an event title. Unknown scopes get the globe.
pub fn scope_flag(scope: &str) -> &'static str {
    match scope {
        "ua" => "🇺🇦",
        "tr" => "🇹🇷",
        "us" => "🇺🇸",
        "eu" => "🇪🇺",
        "jp" => "🇯🇵",
        "kr" => "🇰🇷",
        "eg" => "🇪🇬",
        _ => "🌍",
    }
}

fn is_http_url(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the document shell shared by day and month pages.
fn base_document(
    ctx: &RenderContext,
    page: &PlannedPage,
    lang: Lang,
    title: &str,
    description: &str,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang.code()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width,initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                link rel="canonical" href=(page.url);
                @for alt in &page.alternates {
                    link rel="alternate" hreflang=(alt.lang.code()) href=(alt.href);
                }
                @if let Some(default) = page.x_default() {
                    link rel="alternate" hreflang="x-default" href=(default.href);
                }
                link rel="stylesheet" href=(ctx.stylesheet_href);
            }
            body {
                (content)
                footer.container.footer {
                    span.muted { "© " (lang.strings().site_name) }
                }
            }
        }
    }
}

/// Renders the header: brand, language switcher and page navigation.
fn site_header(page: &PlannedPage, lang: Lang, nav: Markup) -> Markup {
    html! {
        header.container.header {
            div.brand { (lang.strings().site_name) }
            div.controls {
                div.lang {
                    @for alt in &page.alternates {
                        a.chip.active[alt.lang == lang] href=(alt.href) hreflang=(alt.lang.code()) {
                            (alt.lang.chip_label())
                        }
                    }
                }
                nav.nav { (nav) }
            }
        }
    }
}

/// Previous / today / next buttons.
fn nav_buttons(nav: &Navigation, today_href: &str, lang: Lang, prev: &str, next: &str) -> Markup {
    html! {
        a.btn.ghost href=(nav.prev) rel="prev" { (prev) }
        a.btn href=(today_href) { (lang.strings().go_to_today) }
        a.btn.ghost href=(nav.next) rel="next" { (next) }
    }
}

/// Renders a single event card.
fn event_card(event: &Event, lang: Lang) -> Markup {
    let t = lang.strings();
    let description = event.description_for(lang);
    let source = event.first_source().filter(|s| is_http_url(s));

    html! {
        article.event {
            div.eventTop {
                div.eventTitle {
                    (scope_flag(&event.scope)) " " (event.title_for(lang))
                    @if let Some(year) = event.year {
                        " " span.muted { "(" (year) ")" }
                    }
                }
                div.tag { (event.kind) " • " (event.scope) }
            }
            @if !description.is_empty() {
                div.eventMeta { (description) }
            }
            div.eventMeta.tiny {
                strong { (t.tags_label) ":" }
                " "
                @if event.tags.is_empty() {
                    "—"
                } @else {
                    (event.tags.join(", "))
                }
                @if let Some(src) = source {
                    " • "
                    a href=(src) rel="nofollow noopener" target="_blank" { (t.source_label) }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the page for one calendar day.
fn render_day_page(
    ctx: &RenderContext,
    page: &PlannedPage,
    lang: Lang,
    date: NaiveDate,
    nav: &Navigation,
    month_href: &str,
    index: &DayIndex,
) -> Markup {
    let t = lang.strings();
    let events = order(index.visible(date.month(), date.day()));
    let heading = i18n::date_label(lang, date);
    let title = format!("{} — {}", t.site_name, i18n::date_title(lang, date));
    let description = format!(
        "{}: {}. {} {}.",
        t.site_name,
        heading,
        events.len(),
        t.events.to_lowercase()
    );

    let content = html! {
        (site_header(page, lang, nav_buttons(nav, &page.today_href, lang, t.prev_day, t.next_day)))
        main.container {
            h1 { (heading) }
            p.muted.tiny { (t.updated) ": " (ctx.stamp.to_string()) }

            section.panel.events {
                div.panelHead {
                    h2 { (t.events) }
                    span.badge { (events.len()) }
                }
                @if events.is_empty() {
                    p.muted { (t.no_events) }
                } @else {
                    @for event in &events {
                        (event_card(event, lang))
                    }
                }
                p.muted.tiny { (t.disclaimer) }
            }

            section.panel {
                div.panelHead {
                    h2 { (t.month) }
                    a.btn.ghost href=(month_href) rel="up" { (t.back_to_month) }
                }
                p.muted {
                    a href=(month_href) { (i18n::month_title(lang, date.year(), date.month())) }
                }
            }
        }
    };

    base_document(ctx, page, lang, &title, &description, content)
}

/// Renders the calendar grid for one month.
fn render_month_page(
    ctx: &RenderContext,
    page: &PlannedPage,
    lang: Lang,
    month: YearMonth,
    days_in_month: u32,
    nav: &Navigation,
    index: &DayIndex,
) -> Markup {
    let t = lang.strings();
    let heading = i18n::month_label(lang, month.year, month.month);
    let title = format!("{} — {}", t.site_name, i18n::month_title(lang, month.year, month.month));
    let description = format!("{}: {}.", t.site_name, heading);

    let content = html! {
        (site_header(page, lang, nav_buttons(nav, &page.today_href, lang, "←", "→")))
        main.container {
            h1 { (heading) }
            p.muted.tiny { (t.updated) ": " (ctx.stamp.to_string()) }

            section.panel {
                div.panelHead {
                    h2 { (t.month) }
                }
                div.grid {
                    @for day in 1..=days_in_month {
                        @let has_events = index.has_visible(month.month, day);
                        a.day.has-events[has_events] href=(plan::day_path_ymd(lang, month.year, month.month, day)) {
                            strong { (day) }
                            div.hint { @if has_events { "•" } }
                        }
                    }
                }
            }
        }
    };

    base_document(ctx, page, lang, &title, &description, content)
}

/// JSON-encode a value for embedding inside an inline `<script>`.
fn js_literal(value: serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Renders the language-detecting redirect to today's day page.
fn render_today_redirect(config: &SiteConfig) -> Markup {
    let codes: Vec<&str> = config.languages.iter().map(|l| l.code()).collect();
    let fallback = config.default_language();
    // Not the language root: that page redirects back here.
    let fallback_href = format!(
        "{}{}",
        config.site_url,
        plan::month_path(fallback, YearMonth::new(config.target_year, 1))
    );

    let script = format!(
        r#"
(function () {{
  var site = {site};
  var allowed = {allowed};
  var fallback = {fallback};
  var stored = null;
  try {{ stored = window.localStorage.getItem("lang"); }} catch (e) {{}}
  var lang = (stored || (navigator.language || fallback).slice(0, 2)).toLowerCase();
  if (allowed.indexOf(lang) === -1) {{ lang = fallback; }}
  var now = new Date();
  var pad = function (n) {{ return (n < 10 ? "0" : "") + n; }};
  location.replace(site + "/" + lang + "/" + now.getFullYear() + "/" + pad(now.getMonth() + 1) + "/" + pad(now.getDate()) + "/");
}})();
"#,
        site = js_literal(config.site_url.as_str().into()),
        allowed = js_literal(codes.into()),
        fallback = js_literal(fallback.code().into()),
    );

    html! {
        (DOCTYPE)
        html lang=(fallback.code()) {
            head {
                meta charset="utf-8";
                meta name="robots" content="noindex";
                meta name="viewport" content="width=device-width,initial-scale=1";
                title { (fallback.strings().go_to_today) }
            }
            body {
                script { (PreEscaped(script)) }
                noscript {
                    p { a href=(fallback_href) { (fallback_href) } }
                }
            }
        }
    }
}

/// Renders `/{lang}/`, which forwards to the today redirect.
fn render_lang_root(page: &PlannedPage, lang: Lang) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang.code()) {
            head {
                meta charset="utf-8";
                meta name="robots" content="noindex";
                meta http-equiv="refresh" content={ "0;url=" (page.today_href) };
                title { (lang.strings().site_name) }
            }
            body {
                p { a href=(page.today_href) { (lang.strings().go_to_today) } }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
