//! Supported languages and their bundled locale tables.
//!
//! Every user-visible string on the generated site comes from here: the UI
//! labels, the month and weekday names, and the long-form date and month
//! labels used as page headings.
//!
//! ## Bundled Tables
//!
//! Date labels are formatted from static tables instead of a platform locale
//! database. The output of a build must not depend on which locales happen
//! to be installed on the machine running it.
//!
//! ## Date Label Formats
//!
//! | Language | Day heading                   | Month heading       |
//! |----------|-------------------------------|---------------------|
//! | `uk`     | `неділя, 8 березня 2026 р.`   | `березень 2026 р.`  |
//! | `en`     | `Sunday, March 8, 2026`       | `March 2026`        |
//! | `tr`     | `8 Mart 2026 Pazar`           | `Mart 2026`         |

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A language the site is generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Uk,
    En,
    Tr,
}

impl Lang {
    /// All supported languages, in the default site order.
    pub const ALL: [Lang; 3] = [Lang::Uk, Lang::En, Lang::Tr];

    /// Language code used in URLs, `lang=` and `hreflang=` attributes.
    pub fn code(self) -> &'static str {
        match self {
            Lang::Uk => "uk",
            Lang::En => "en",
            Lang::Tr => "tr",
        }
    }

    /// Short label on the language switcher chips.
    pub fn chip_label(self) -> &'static str {
        match self {
            Lang::Uk => "UA",
            Lang::En => "EN",
            Lang::Tr => "TR",
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Lang::Uk => &UK,
            Lang::En => &EN,
            Lang::Tr => &TR,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// UI labels for one language.
#[derive(Debug)]
pub struct Strings {
    pub site_name: &'static str,
    pub events: &'static str,
    pub month: &'static str,
    pub prev_day: &'static str,
    pub next_day: &'static str,
    pub back_to_month: &'static str,
    pub go_to_today: &'static str,
    pub no_events: &'static str,
    pub updated: &'static str,
    pub disclaimer: &'static str,
    pub tags_label: &'static str,
    pub source_label: &'static str,
    /// Month names as used standalone ("березень").
    months: [&'static str; 12],
    /// Month names as used after a day number ("8 березня").
    months_genitive: [&'static str; 12],
    /// Weekday names, Monday first.
    weekdays: [&'static str; 7],
}

static UK: Strings = Strings {
    site_name: "Сьогодні в Україні",
    events: "Події та свята",
    month: "Календар місяця",
    prev_day: "← Попередній день",
    next_day: "Наступний день →",
    back_to_month: "← До місяця",
    go_to_today: "Сьогодні",
    no_events: "Немає подій у базі для цієї дати.",
    updated: "Оновлено",
    disclaimer: "Примітка: статус «вихідного дня» може змінюватися залежно від чинних правил.",
    tags_label: "Теги",
    source_label: "джерело",
    months: [
        "січень", "лютий", "березень", "квітень", "травень", "червень", "липень", "серпень",
        "вересень", "жовтень", "листопад", "грудень",
    ],
    months_genitive: [
        "січня", "лютого", "березня", "квітня", "травня", "червня", "липня", "серпня",
        "вересня", "жовтня", "листопада", "грудня",
    ],
    weekdays: [
        "понеділок", "вівторок", "середа", "четвер", "пʼятниця", "субота", "неділя",
    ],
};

static EN: Strings = Strings {
    site_name: "Today in Ukraine",
    events: "Events & holidays",
    month: "Month calendar",
    prev_day: "← Previous day",
    next_day: "Next day →",
    back_to_month: "← Back to month",
    go_to_today: "Today",
    no_events: "No events in the database for this date.",
    updated: "Updated",
    disclaimer: "Note: “day off” status can change depending on current rules.",
    tags_label: "Tags",
    source_label: "source",
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    months_genitive: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    weekdays: [
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ],
};

static TR: Strings = Strings {
    site_name: "Ukrayna’da Bugün",
    events: "Etkinlikler ve günler",
    month: "Aylık takvim",
    prev_day: "← Önceki gün",
    next_day: "Sonraki gün →",
    back_to_month: "← Aya dön",
    go_to_today: "Bugün",
    no_events: "Bu tarih için veri tabanında etkinlik yok.",
    updated: "Güncellendi",
    disclaimer: "Not: “resmî tatil” durumu güncel kurallara göre değişebilir.",
    tags_label: "Etiketler",
    source_label: "kaynak",
    months: [
        "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül",
        "Ekim", "Kasım", "Aralık",
    ],
    months_genitive: [
        "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül",
        "Ekim", "Kasım", "Aralık",
    ],
    weekdays: [
        "Pazartesi", "Salı", "Çarşamba", "Perşembe", "Cuma", "Cumartesi", "Pazar",
    ],
};

impl Strings {
    /// Standalone month name, `month` in 1..=12.
    pub fn month_name(&self, month: u32) -> &'static str {
        self.months[month_slot(month)]
    }

    fn month_name_genitive(&self, month: u32) -> &'static str {
        self.months_genitive[month_slot(month)]
    }

    fn weekday_name(&self, date: NaiveDate) -> &'static str {
        self.weekdays[date.weekday().num_days_from_monday() as usize]
    }
}

fn month_slot(month: u32) -> usize {
    (month.clamp(1, 12) - 1) as usize
}

/// Short numeric title of a day page, used in `<title>`.
pub fn date_title(lang: Lang, date: NaiveDate) -> String {
    let (y, m, d) = (date.year(), date.month(), date.day());
    match lang {
        Lang::Uk => format!("Свята та події: {d}.{m}.{y}"),
        Lang::En => format!("Holidays & events: {y}-{m:02}-{d:02}"),
        Lang::Tr => format!("Günler ve olaylar: {d:02}.{m:02}.{y}"),
    }
}

/// Short numeric title of a month page, used in `<title>` and month links.
pub fn month_title(lang: Lang, year: i32, month: u32) -> String {
    match lang {
        Lang::Uk => format!("Календар: {month}.{year}"),
        Lang::En => format!("Calendar: {year}-{month:02}"),
        Lang::Tr => format!("Takvim: {month:02}.{year}"),
    }
}

/// Long date heading including the weekday.
pub fn date_label(lang: Lang, date: NaiveDate) -> String {
    let t = lang.strings();
    let weekday = t.weekday_name(date);
    let (y, m, d) = (date.year(), date.month(), date.day());
    match lang {
        Lang::Uk => format!("{weekday}, {d} {} {y} р.", t.month_name_genitive(m)),
        Lang::En => format!("{weekday}, {} {d}, {y}", t.month_name(m)),
        Lang::Tr => format!("{d} {} {y} {weekday}", t.month_name_genitive(m)),
    }
}

/// Month heading ("March 2026").
pub fn month_label(lang: Lang, year: i32, month: u32) -> String {
    let name = lang.strings().month_name(month);
    match lang {
        Lang::Uk => format!("{name} {year} р."),
        Lang::En | Lang::Tr => format!("{name} {year}"),
    }
}
