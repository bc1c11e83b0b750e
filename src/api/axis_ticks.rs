use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::unit_format::UnitFormatter;

const TRUNCATION_SUFFIX: &str = "...";
/// Interval used for flat ranges, as a fraction of the maximum.
const FLAT_RANGE_INTERVAL_RATIO: f64 = 0.2;

/// Tick positions and their unit-formatted labels for a value axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTicks {
    pub values: SmallVec<[f64; 5]>,
    pub labels: Vec<String>,
}

impl ValueTicks {
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.values.last().copied()
    }

    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.values.first().copied()
    }
}

/// Evenly spaced ticks over `[min, max]`.
///
/// A flat range (`max == min`) would collapse every tick onto one value, so
/// the interval falls back to a fraction of `max` instead.
pub(super) fn value_ticks(range: (f64, f64), tick_count: usize) -> SmallVec<[f64; 5]> {
    if tick_count == 0 {
        return SmallVec::new();
    }
    if tick_count == 1 {
        return SmallVec::from_slice(&[range.0]);
    }

    let (min, max) = range;
    let mut interval = (max - min) / (tick_count - 1) as f64;
    if interval == 0.0 {
        interval = max * FLAT_RANGE_INTERVAL_RATIO;
    }
    (0..tick_count)
        .map(|index| min + interval * index as f64)
        .collect()
}

pub(super) fn formatted_value_ticks(
    range: (f64, f64),
    tick_count: usize,
    formatter: &UnitFormatter<'_>,
) -> ValueTicks {
    let values = value_ticks(range, tick_count);
    let labels = values.iter().map(|value| formatter.format(*value)).collect();
    ValueTicks { values, labels }
}

/// Picks `budget` category values at a uniform stride plus the final value.
///
/// For an axis of length `L >= budget + 1` the result always has exactly
/// `budget + 1` entries and ends with the last category. The budget is capped
/// at `L`, so a short axis yields each category once plus the last again.
#[must_use]
pub fn sample_category_ticks<T: Clone>(values: &[T], budget: usize) -> Vec<T> {
    if values.is_empty() {
        return Vec::new();
    }

    let len = values.len();
    let budget = budget.clamp(1, len);
    let mut sampled = Vec::with_capacity(budget + 1);
    for slot in 0..budget {
        let index = (slot * len / budget).min(len - 1);
        sampled.push(values[index].clone());
    }
    sampled.push(values[len - 1].clone());
    sampled
}

/// Shortens tick text longer than `max_chars` characters, marking the cut with
/// an ellipsis.
#[must_use]
pub fn truncate_tick_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str(TRUNCATION_SUFFIX);
    out
}

#[cfg(test)]
mod tests {
    use super::{sample_category_ticks, truncate_tick_label, value_ticks};

    #[test]
    fn value_ticks_span_the_range() {
        let ticks = value_ticks((0.0, 8.0), 5);
        assert_eq!(ticks.as_slice(), &[0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn flat_range_uses_fraction_of_max() {
        let ticks = value_ticks((10.0, 10.0), 5);
        assert_eq!(ticks.as_slice(), &[10.0, 12.0, 14.0, 16.0, 18.0]);
    }

    #[test]
    fn sampler_strides_and_keeps_last() {
        let values: Vec<u32> = (0..10).collect();
        assert_eq!(sample_category_ticks(&values, 4), vec![0, 2, 5, 7, 9]);
    }

    #[test]
    fn sampler_caps_budget_at_axis_length() {
        assert_eq!(sample_category_ticks(&["a", "b"], 4), vec!["a", "b", "b"]);
        assert_eq!(sample_category_ticks(&["a"], usize::MAX), vec!["a", "a"]);
        assert!(sample_category_ticks::<u8>(&[], 4).is_empty());
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_tick_label("short", 15), "short");
        assert_eq!(
            truncate_tick_label("a-very-long-hostname.example", 15),
            "a-very-long-hos..."
        );
        assert_eq!(truncate_tick_label("ééééééééééééééééé", 15), "ééééééééééééééé...");
    }
}
