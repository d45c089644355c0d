//! Key normalization.
//!
//! Every value that enters an index, and every value a condition compares
//! against, goes through [`transform`] so that ingest-time and query-time
//! keys agree. A value normalizes to zero or more string keys:
//!
//! | Type     | Keys                                                        |
//! |----------|-------------------------------------------------------------|
//! | `WORD`   | the whole value, lower-cased                                |
//! | `TEXT`   | lower-cased words; anything outside `[a-z]` separates words |
//! | `NUMBER` | one canonical decimal string                                |
//! | `DATE`   | one `YYYY-MM-DD` string                                     |
//!
//! Absent, blank, or unparsable values yield no keys.

use crate::types::IndexType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::borrow::Cow;

/// Day-granularity format of `DATE` keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted layouts for date-time strings, besides RFC 3339.
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Reports whether `type_name` names a recognized index type.
#[must_use]
pub fn can_transform(type_name: &str) -> bool {
    type_name.parse::<IndexType>().is_ok()
}

/// Normalizes a raw field value into the keys it is indexed under.
#[must_use]
pub fn transform(index_type: IndexType, value: &Value) -> Vec<String> {
    match index_type {
        IndexType::Word => word_keys(value),
        IndexType::Text => text_keys(value),
        IndexType::Number => parse_number(value).map(number_key).into_iter().collect(),
        IndexType::Date => parse_date(value).map(date_key).into_iter().collect(),
    }
}

/// Normalizes a wildcard pattern value.
///
/// Patterns are lower-cased but keep their metacharacters; on `TEXT`
/// indexes they split on whitespace only, one pattern per word.
#[must_use]
pub fn pattern_terms(index_type: IndexType, value: &Value) -> Vec<String> {
    let Some(text) = scalar_text(value) else {
        return Vec::new();
    };
    let lower = text.to_lowercase();

    match index_type {
        IndexType::Text => lower.split_whitespace().map(str::to_owned).collect(),
        IndexType::Word if lower.trim().is_empty() => Vec::new(),
        IndexType::Word => vec![lower],
        IndexType::Number | IndexType::Date => transform(index_type, value),
    }
}

/// Formats a number as its canonical key.
#[must_use]
pub fn number_key(n: f64) -> String {
    // fold -0 into 0
    let n = if n == 0.0 { 0.0 } else { n };
    n.to_string()
}

/// Decodes a `NUMBER` key.
#[must_use]
pub fn number_value(key: &str) -> Option<f64> {
    key.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Formats a date as its canonical key.
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Decodes a `DATE` key.
#[must_use]
pub fn date_value(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_FORMAT).ok()
}

/// Encodes a date the way records and conditions carry it.
#[must_use]
pub fn date_json(date: NaiveDate) -> Value {
    Value::String(date_key(date))
}

/// Text form of a scalar, if the value is one.
fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn word_keys(value: &Value) -> Vec<String> {
    match scalar_text(value) {
        Some(text) if !text.trim().is_empty() => vec![text.to_lowercase()],
        _ => Vec::new(),
    }
}

fn text_keys(value: &Value) -> Vec<String> {
    let Some(text) = scalar_text(value) else {
        return Vec::new();
    };

    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().map(str::to_owned).collect()
}

fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        // JSON encoding of a native date: epoch milliseconds
        Value::Number(n) => {
            let millis = match n.as_i64() {
                Some(ms) => ms,
                None => {
                    let ms = n.as_f64()?;
                    if !ms.is_finite() || ms.abs() >= i64::MAX as f64 {
                        return None;
                    }
                    ms as i64
                }
            };
            DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}
