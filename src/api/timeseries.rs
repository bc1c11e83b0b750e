use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use tracing::{debug, warn};

use crate::core::CellValue;

use super::chart_output::{AxisOption, AxisType, EChartsSeries, SeriesData};

static ISO_SECOND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$").expect("valid ISO timestamp regex")
});

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// How the category axis was turned into a continuous time axis, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAxisCorrection {
    Unchanged,
    /// The primary x field is a histogram over the timestamp column.
    Histogram,
    /// Every sampled category looked like `YYYY-MM-DDTHH:MM:SS`.
    InferredIso,
}

/// `true` for strings shaped exactly like `YYYY-MM-DDTHH:MM:SS`.
#[must_use]
pub fn is_iso_second_timestamp(text: &str) -> bool {
    ISO_SECOND_PATTERN.is_match(text)
}

/// Parses a timestamp string into milliseconds since epoch.
///
/// Offset-less values are read as UTC. Returns `None` when no supported
/// format matches.
#[must_use]
pub fn parse_epoch_millis(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis());
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
}

/// Reinterprets a histogram bucket value as epoch milliseconds.
///
/// Numbers are taken to be milliseconds already; anything unparseable becomes
/// `null`.
pub(super) fn histogram_bucket_millis(value: &CellValue) -> CellValue {
    match value {
        CellValue::Number(_) => value.clone(),
        CellValue::Text(text) => match parse_epoch_millis(text) {
            Some(millis) => CellValue::Number(millis as f64),
            None => {
                warn!(value = %text, "unparseable histogram timestamp");
                CellValue::Null
            }
        },
        CellValue::Null | CellValue::Bool(_) => CellValue::Null,
    }
}

/// Builds the category axis, switching it to a time axis when the
/// categories are timestamps.
///
/// On a switch, every positional series is re-paired as `(x, value)` points
/// and the axis keeps an empty category list.
pub(super) fn resolve_category_axis(
    categories: Vec<CellValue>,
    series: &mut [EChartsSeries],
    histogram_over_timestamp: bool,
    sample_size: usize,
) -> (AxisOption, TimeAxisCorrection) {
    if histogram_over_timestamp {
        pair_series_with(&categories, series);
        return (time_axis(), TimeAxisCorrection::Histogram);
    }

    if let Some(millis) = inferred_epoch_millis(&categories, sample_size) {
        debug!(
            categories = categories.len(),
            sample_size, "category axis inferred as ISO time series"
        );
        pair_series_with(&millis, series);
        return (time_axis(), TimeAxisCorrection::InferredIso);
    }

    (AxisOption::category(categories), TimeAxisCorrection::Unchanged)
}

/// Epoch-millisecond keys when the leading `sample_size` categories all match
/// the ISO pattern. An empty axis is never a time series.
fn inferred_epoch_millis(categories: &[CellValue], sample_size: usize) -> Option<Vec<CellValue>> {
    if categories.is_empty() {
        return None;
    }
    let sampled_all_iso = categories
        .iter()
        .take(sample_size.max(1))
        .all(|value| value.as_str().is_some_and(is_iso_second_timestamp));
    if !sampled_all_iso {
        return None;
    }

    Some(
        categories
            .iter()
            .map(|value| {
                value
                    .as_str()
                    .and_then(parse_epoch_millis)
                    .map(|millis| CellValue::Number(millis as f64))
                    .unwrap_or(CellValue::Null)
            })
            .collect(),
    )
}

fn time_axis() -> AxisOption {
    AxisOption {
        axis_type: AxisType::Time,
        data: Some(Vec::new()),
        ..AxisOption::category(Vec::new())
    }
}

fn pair_series_with(keys: &[CellValue], series: &mut [EChartsSeries]) {
    for entry in series {
        if let SeriesData::Values(values) = &mut entry.data {
            let points = std::mem::take(values)
                .into_iter()
                .enumerate()
                .map(|(index, value)| {
                    let key = keys.get(index).cloned().unwrap_or(CellValue::Null);
                    (key, value)
                })
                .collect();
            entry.data = SeriesData::Points(points);
        }
    }
}
