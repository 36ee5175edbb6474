//! Measurement series input.
//!
//! A series is an ordered list of dated measurements. Values may be absent,
//! in which case the point is an annotation (for example an intervention
//! marker) and takes no part in any numeric computation.
//!
//! Parsing is permissive: a value that does not parse as a finite number
//! becomes `None` rather than an error. A row whose date cannot be parsed is
//! dropped, since it has no place in the chronological order.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Category tag conventionally used for value-less intervention markers.
pub const INTERVENTION_CATEGORY: &str = "intervention";

/// A single dated measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    /// Calendar date of the measurement. Any format [`parse_date`] accepts.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    /// Measured value, or `None` for a pure annotation.
    #[serde(default, deserialize_with = "deserialize_lenient_value")]
    pub value: Option<f64>,
    /// Free-form tag such as `"outcome"` or `"intervention"`.
    #[serde(default, alias = "type")]
    pub category: String,
}

impl MeasurementPoint {
    /// Create a measurement with a numeric value.
    ///
    /// Non-finite values are stored as `None`.
    pub fn new(date: NaiveDate, value: f64, category: impl Into<String>) -> Self {
        Self {
            date,
            value: value.is_finite().then_some(value),
            category: category.into(),
        }
    }

    /// Create a value-less annotation point.
    pub fn annotation(date: NaiveDate, category: impl Into<String>) -> Self {
        Self {
            date,
            value: None,
            category: category.into(),
        }
    }

    /// The value if it takes part in numeric computation.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

/// An untyped measurement row, as entered in a form or read from a CSV file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMeasurement {
    pub date: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, alias = "type")]
    pub category: String,
}

impl RawMeasurement {
    pub fn new(
        date: impl Into<String>,
        value: Option<&str>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            value: value.map(str::to_string),
            category: category.into(),
        }
    }

    /// Convert into a typed point.
    ///
    /// Returns `None` when the date is unparseable. An unparseable value
    /// yields a point with `value: None`.
    pub fn parse(&self) -> Option<MeasurementPoint> {
        let date = parse_date(&self.date)?;
        Some(MeasurementPoint {
            date,
            value: self.value.as_deref().and_then(parse_value),
            category: self.category.trim().to_string(),
        })
    }
}

/// Parse a measurement value.
///
/// Surrounding whitespace and a trailing `%` are ignored. Empty, non-numeric
/// and non-finite input gives `None`.
pub fn parse_value(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|ts| ts.date())
}

/// Parse a batch of raw rows, dropping rows whose date is unparseable.
pub fn parse_series(rows: &[RawMeasurement]) -> Vec<MeasurementPoint> {
    rows.iter()
        .enumerate()
        .filter_map(|(row, raw)| {
            let parsed = raw.parse();
            if parsed.is_none() {
                debug!(row, date = %raw.date, "dropping measurement row with unparseable date");
            }
            parsed
        })
        .collect()
}

/// Return a copy of `points` in ascending date order.
///
/// The sort is stable, so points sharing a date keep their relative order.
pub fn sorted_chronologically(points: &[MeasurementPoint]) -> Vec<MeasurementPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.date);
    sorted
}

/// Deserialize a list of measurements, dropping entries without a usable date.
///
/// Each entry is read as an untyped JSON value so that one malformed row
/// cannot fail the whole list.
pub fn deserialize_lenient_series<'de, D>(
    deserializer: D,
) -> Result<Vec<MeasurementPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(rows
        .iter()
        .enumerate()
        .filter_map(|(row, entry)| {
            let parsed = point_from_json(entry);
            if parsed.is_none() {
                debug!(row, %entry, "dropping measurement entry with unparseable date");
            }
            parsed
        })
        .collect())
}

fn point_from_json(entry: &serde_json::Value) -> Option<MeasurementPoint> {
    let date = entry.get("date")?.as_str().and_then(parse_date)?;
    let category = entry
        .get("category")
        .or_else(|| entry.get("type"))
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();
    Some(MeasurementPoint {
        date,
        value: entry.get("value").and_then(lenient_value),
        category,
    })
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unparseable date: {raw:?}")))
}

/// Accept numbers, numeric strings and `null`; anything else maps to `None`.
fn deserialize_lenient_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(lenient_value))
}

fn lenient_value(raw: &serde_json::Value) -> Option<f64> {
    match raw {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => parse_value(s),
        _ => None,
    }
}
