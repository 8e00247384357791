//! Scalar canonicalization: the single place where truth-side JSON values
//! and extract-side cell strings become comparable.

use chrono::{DateTime, Datelike};
use serde_json::{Number, Value};

use crate::model::Verdict;

/// Strict lower bound above which a number is read as milliseconds since epoch.
const EPOCH_MILLIS_MIN: f64 = 1e12;
/// Strict lower bound above which a number is read as seconds since epoch.
const EPOCH_SECONDS_MIN: f64 = 1e9;

/// Epoch interpretations landing outside this year range are rejected as
/// false positives (ordinary large integers, record ids).
const EPOCH_YEAR_MIN: i32 = 1900;
const EPOCH_YEAR_MAX: i32 = 2100;

/// Canonicalize a truth-side value into a comparable string.
///
/// Absent and null become empty. Numbers get an epoch-timestamp
/// interpretation first, then fall back to a plain numeric rendering with
/// whole-valued floats printed as integers. Everything else renders as a
/// trimmed string. Deterministic, never panics.
pub fn normalize_value(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match value {
        Value::Null => String::new(),
        Value::Number(n) => normalize_number(n),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Canonicalize an extract-side cell. Extract tables are ingested as
/// all-string, so this is a trim only — a cell that happens to hold digits
/// is still text, not a candidate epoch.
pub fn normalize_text(cell: &str) -> String {
    cell.trim().to_string()
}

/// Fold an identity key for lookup: trimmed, lowercase.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Verdict for two already-normalized values: both blank → no opinion,
/// otherwise case-folded equality.
pub fn verdict(truth: &str, extract: &str) -> Verdict {
    if truth.is_empty() && extract.is_empty() {
        Verdict::NoOpinion
    } else if truth.to_lowercase() == extract.to_lowercase() {
        Verdict::Match
    } else {
        Verdict::Mismatch
    }
}

fn normalize_number(n: &Number) -> String {
    let Some(v) = n.as_f64() else {
        return n.to_string();
    };
    if v.is_nan() {
        return String::new();
    }
    if let Some(date) = epoch_date(v) {
        return date;
    }
    // Whole-valued floats print as integers: 42.0 → "42"
    if n.is_f64() && v.is_finite() && v.fract() == 0.0 {
        return format!("{v:.0}");
    }
    n.to_string()
}

/// Interpret a number as an epoch timestamp: strictly above 1e12 it is
/// milliseconds, strictly above 1e9 it is seconds. The resulting UTC year
/// must land in [1900, 2100], otherwise the interpretation is rejected and
/// the caller falls through to the plain numeric rendering.
fn epoch_date(v: f64) -> Option<String> {
    let secs = if v > EPOCH_MILLIS_MIN {
        v / 1000.0
    } else if v > EPOCH_SECONDS_MIN {
        v
    } else {
        return None;
    };
    let ts = DateTime::from_timestamp(secs as i64, 0)?;
    if !(EPOCH_YEAR_MIN..=EPOCH_YEAR_MAX).contains(&ts.year()) {
        return None;
    }
    Some(ts.format("%Y-%m-%d").to_string())
}
