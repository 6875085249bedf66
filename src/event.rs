//! Dataset loading and event normalization.
//!
//! The dataset is a JSON array of loosely-typed records produced by an
//! offline generator. Loading is strict (a file that cannot be read or
//! decoded aborts the build) but normalization is lenient: records that lack
//! a usable month or day, or that belong to another year, are dropped
//! without error.
//!
//! ## Record Shape
//!
//! ```json
//! {
//!   "id": "ua-3-8-0",
//!   "year": null,
//!   "month": 3,
//!   "day": 8,
//!   "scope": "ua",
//!   "type": "historical",
//!   "verified": true,
//!   "title": { "uk": "…", "en": "…" },
//!   "description": { "uk": "…" },
//!   "tags": ["ua", "history"],
//!   "sources": ["https://…"]
//! }
//! ```
//!
//! Older datasets carry the description under `desc`; it is read when
//! `description` is absent.
//!
//! ## Coercion Rules
//!
//! | Field | Rule |
//! |-------|------|
//! | `month`, `day` | integer or numeric string, in range; otherwise the record is dropped |
//! | `year` | falsy = recurring; otherwise an integral number equal to the target year |
//! | `scope` / `type` | default `"global"` / `"other"` |
//! | `title` / `description` | object of strings, otherwise empty |
//! | `tags` / `sources` | array, otherwise empty; scalars stringified |
//! | `verified` | only a literal `true` counts |

use crate::i18n::Lang;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("cannot read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse dataset {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("dataset {} must be a JSON array of event records", .0.display())]
    NotAnArray(PathBuf),
}

/// Localized text keyed by language code.
pub type Localized = BTreeMap<String, String>;

/// Placeholder shown when an event has no title in any language.
pub const MISSING_TITLE: &str = "—";

/// Language order tried after the requested one.
const FALLBACK_ORDER: [Lang; 3] = [Lang::Uk, Lang::En, Lang::Tr];

/// A canonical calendar event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Option<String>,
    /// `None` for recurring events.
    pub year: Option<i64>,
    pub month: u32,
    pub day: u32,
    pub scope: String,
    /// The record's `type` field.
    pub kind: String,
    pub title: Localized,
    pub description: Localized,
    pub tags: Vec<String>,
    pub sources: Vec<String>,
    pub verified: bool,
}

impl Event {
    /// Title in `lang`, falling back through uk → en → tr → `"—"`.
    pub fn title_for(&self, lang: Lang) -> &str {
        localized(&self.title, lang).unwrap_or(MISSING_TITLE)
    }

    /// Description in `lang`, falling back through uk → en → tr → `""`.
    pub fn description_for(&self, lang: Lang) -> &str {
        localized(&self.description, lang).unwrap_or("")
    }

    /// The one source surfaced on the page.
    pub fn first_source(&self) -> Option<&str> {
        self.sources.first().map(String::as_str)
    }
}

fn localized(text: &Localized, lang: Lang) -> Option<&str> {
    std::iter::once(lang)
        .chain(FALLBACK_ORDER)
        .filter_map(|l| text.get(l.code()))
        .map(String::as_str)
        .find(|s| !s.is_empty())
}

/// Outcome of normalizing a dataset.
#[derive(Debug, Default)]
pub struct Normalized {
    pub events: Vec<Event>,
    /// Records without a usable month/day.
    pub malformed: usize,
    /// Records dated in a different year.
    pub other_year: usize,
}

/// Read and decode the dataset file into raw records.
///
/// Runs before anything in the output directory is touched, so a bad
/// dataset never destroys a previously good build.
pub fn load_dataset(path: &Path) -> Result<Vec<Value>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Array(records) => Ok(records),
        _ => Err(DatasetError::NotAnArray(path.to_path_buf())),
    }
}

/// Coerce raw records into canonical events for `target_year`.
pub fn normalize(records: &[Value], target_year: i32) -> Normalized {
    let mut out = Normalized::default();
    for record in records {
        match normalize_record(record, target_year) {
            Ok(event) => out.events.push(event),
            Err(Skip::Malformed) => out.malformed += 1,
            Err(Skip::OtherYear) => out.other_year += 1,
        }
    }
    out
}

enum Skip {
    Malformed,
    OtherYear,
}

fn normalize_record(record: &Value, target_year: i32) -> Result<Event, Skip> {
    let obj = record.as_object().ok_or(Skip::Malformed)?;

    let month = int_field(obj, "month")
        .filter(|m| (1..=12).contains(m))
        .ok_or(Skip::Malformed)?;
    let day = int_field(obj, "day")
        .filter(|d| (1..=31).contains(d))
        .ok_or(Skip::Malformed)?;

    let year = match obj.get("year") {
        Some(v) if is_truthy(v) => match v.as_number().and_then(integral) {
            Some(y) if y == i64::from(target_year) => Some(y),
            _ => return Err(Skip::OtherYear),
        },
        _ => None,
    };

    let description = obj
        .get("description")
        .filter(|v| !v.is_null())
        .or_else(|| obj.get("desc"));

    Ok(Event {
        id: non_empty_str(obj.get("id")).map(str::to_string),
        year,
        month: month as u32,
        day: day as u32,
        scope: non_empty_str(obj.get("scope")).unwrap_or("global").to_string(),
        kind: non_empty_str(obj.get("type")).unwrap_or("other").to_string(),
        title: localized_map(obj.get("title")),
        description: localized_map(description),
        tags: string_list(obj.get("tags")),
        sources: string_list(obj.get("sources")),
        verified: obj.get("verified") == Some(&Value::Bool(true)),
    })
}

/// Integer coercion for `month`/`day`: numbers and numeric strings.
fn int_field(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    match obj.get(key)? {
        Value::Number(n) => integral(n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `3` and `3.0` alike; `None` for fractions.
fn integral(n: &Number) -> Option<i64> {
    n.as_i64()
        .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn localized_map(value: Option<&Value>) -> Localized {
    value
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .filter_map(|(lang, text)| Some((lang.clone(), text.as_str()?.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}
