//! Record trait defining what the list pipeline needs from a domain type

use chrono::{DateTime, Datelike, NaiveDate};
use serde_json::Value;
use std::borrow::Cow;

/// A domain record shown in a list view (book, homework, attendance entry...)
///
/// The pipeline treats records as opaque apart from:
/// - id: a stable, server-assigned identifier used for replace/remove
/// - field_value: string-valued lookup of the fields a query can constrain
/// - search_fields: the display fields the free-text search looks at
///
/// Records may expose derived fields that are not stored on the wire,
/// e.g. `month` and `year` computed from a date.
pub trait ListItem: Clone + Send + Sync + 'static {
    /// Get the unique identifier of this record
    fn id(&self) -> &str;

    /// Get the value of a named field as a string
    fn field_value(&self, field: &str) -> Option<Cow<'_, str>>;

    /// Fields matched by the free-text search
    fn search_fields() -> &'static [&'static str] {
        &[]
    }

    /// Check whether `term` (already lowercased) occurs in any search field
    fn matches_text(&self, term: &str) -> bool {
        Self::search_fields().iter().any(|field| {
            self.field_value(field)
                .is_some_and(|value| value.to_lowercase().contains(term))
        })
    }
}

/// Raw JSON objects as they come out of an envelope
///
/// The identifier is read from `_id`, then `id`. Field lookup stringifies
/// scalars. Free-text search covers every top-level string field.
impl ListItem for Value {
    fn id(&self) -> &str {
        self.get("_id")
            .or_else(|| self.get("id"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.get(field)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    fn matches_text(&self, term: &str) -> bool {
        self.as_object().is_some_and(|map| {
            map.values()
                .filter_map(Value::as_str)
                .any(|s| s.to_lowercase().contains(term))
        })
    }
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English month names, in calendar order
pub fn month_names() -> &'static [&'static str] {
    &MONTHS
}

/// Parse a backend date (RFC 3339 timestamp or `YYYY-MM-DD`)
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// English month name and four-digit year of a backend date
pub fn month_and_year(raw: &str) -> Option<(&'static str, String)> {
    let date = parse_date(raw)?;
    Some((MONTHS[date.month0() as usize], date.year().to_string()))
}

/// Date as shown in tables (`MM/DD/YYYY`); unparseable input is shown as-is
pub fn display_date(raw: &str) -> String {
    parse_date(raw)
        .map(|date| date.format("%m/%d/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}
