use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Conversion tuning shared by both pipelines.
///
/// This type is serializable so host applications can persist/load panel
/// rendering defaults without inventing their own ad-hoc format. Every field
/// falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Column the backend designates as the event timestamp.
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
    /// Panel width in grid columns; the category tick budget is `width - 2`.
    #[serde(default = "default_panel_width")]
    pub panel_width: usize,
    /// Tick labels longer than this many characters are truncated.
    #[serde(default = "default_tick_label_max_chars")]
    pub tick_label_max_chars: usize,
    /// Leading category values inspected when sniffing ISO timestamps.
    #[serde(default = "default_timeseries_sample_size")]
    pub timeseries_sample_size: usize,
    /// Evenly spaced y-axis ticks generated for metric range vectors.
    #[serde(default = "default_value_tick_count")]
    pub value_tick_count: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            timestamp_column: default_timestamp_column(),
            panel_width: default_panel_width(),
            tick_label_max_chars: default_tick_label_max_chars(),
            timeseries_sample_size: default_timeseries_sample_size(),
            value_tick_count: default_value_tick_count(),
        }
    }
}

impl ConvertOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the designated timestamp column.
    #[must_use]
    pub fn with_timestamp_column(mut self, column: impl Into<String>) -> Self {
        self.timestamp_column = column.into();
        self
    }

    /// Sets the panel width used to derive the category tick budget.
    #[must_use]
    pub fn with_panel_width(mut self, width: usize) -> Self {
        self.panel_width = width;
        self
    }

    #[must_use]
    pub fn with_tick_label_max_chars(mut self, max_chars: usize) -> Self {
        self.tick_label_max_chars = max_chars;
        self
    }

    #[must_use]
    pub fn with_timeseries_sample_size(mut self, sample_size: usize) -> Self {
        self.timeseries_sample_size = sample_size;
        self
    }

    #[must_use]
    pub fn with_value_tick_count(mut self, tick_count: usize) -> Self {
        self.value_tick_count = tick_count;
        self
    }

    /// Number of uniformly strided category ticks, never below one.
    #[must_use]
    pub fn category_tick_budget(&self) -> usize {
        self.panel_width.saturating_sub(2).max(1)
    }

    /// Serializes options to pretty JSON for config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize options: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse options: {e}")))
    }
}

fn default_timestamp_column() -> String {
    "_timestamp".to_owned()
}

fn default_panel_width() -> usize {
    6
}

fn default_tick_label_max_chars() -> usize {
    15
}

fn default_timeseries_sample_size() -> usize {
    20
}

fn default_value_tick_count() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::ConvertOptions;
    use crate::error::ChartError;

    #[test]
    fn missing_fields_take_defaults() {
        let options: ConvertOptions =
            serde_json::from_str(r#"{"panel_width": 12}"#).expect("decode options");
        assert_eq!(options.panel_width, 12);
        assert_eq!(options.timestamp_column, "_timestamp");
        assert_eq!(options.category_tick_budget(), 10);
    }

    #[test]
    fn options_json_round_trips_and_reports_invalid_data() {
        let options = ConvertOptions::new().with_timestamp_column("ts");
        let json = options.to_json_pretty().expect("encode options");
        assert_eq!(ConvertOptions::from_json_str(&json).expect("decode"), options);

        let err = ConvertOptions::from_json_str(r#"{"panel_width": -1}"#).expect_err("must fail");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }

    #[test]
    fn narrow_panels_keep_one_tick() {
        let options = ConvertOptions::new().with_panel_width(1);
        assert_eq!(options.category_tick_budget(), 1);
    }
}
