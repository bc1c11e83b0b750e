use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{PanelConfig, UnitFamily};

const BYTE_LADDER: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const BYTE_CEILING: &str = "PB";
const BYTE_STEP: f64 = 1024.0;

/// Divisors walked in ascending order; the first unit that lands the value in
/// `[1, 1000)` wins.
const SECONDS_LADDER: [(&str, f64); 7] = [
    ("ms", 0.001),
    ("s", 1.0),
    ("m", 60.0),
    ("h", 3_600.0),
    ("D", 86_400.0),
    ("M", 2_592_000.0),
    ("Y", 31_536_000.0),
];

/// Scaled value and its unit suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledValue {
    pub display_value: String,
    pub unit_suffix: String,
}

impl ScaledValue {
    fn new(display_value: String, unit_suffix: impl Into<String>) -> Self {
        Self {
            display_value,
            unit_suffix: unit_suffix.into(),
        }
    }
}

impl fmt::Display for ScaledValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.display_value, self.unit_suffix)
    }
}

/// Converts raw values into display text for one unit family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitFormatter<'a> {
    family: Option<UnitFamily>,
    custom_suffix: Option<&'a str>,
}

impl<'a> UnitFormatter<'a> {
    #[must_use]
    pub fn new(family: Option<UnitFamily>, custom_suffix: Option<&'a str>) -> Self {
        Self {
            family,
            custom_suffix,
        }
    }

    #[must_use]
    pub fn from_config(config: &'a PanelConfig) -> Self {
        Self::new(config.unit, config.unit_custom.as_deref())
    }

    #[must_use]
    pub fn family(&self) -> Option<UnitFamily> {
        self.family
    }

    #[must_use]
    pub fn scale(&self, value: f64) -> ScaledValue {
        scale_value(value, self.family, self.custom_suffix)
    }

    /// Value and suffix concatenated without a separator.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        self.scale(value).to_string()
    }
}

/// Scales `value` for `family`.
///
/// A missing family behaves like [`UnitFamily::Default`]: the value is echoed
/// unformatted with an empty suffix.
#[must_use]
pub fn scale_value(value: f64, family: Option<UnitFamily>, custom_suffix: Option<&str>) -> ScaledValue {
    match family.unwrap_or_default() {
        UnitFamily::Bytes => scale_bytes(value, ""),
        UnitFamily::Bps => scale_bytes(value, "/s"),
        UnitFamily::Seconds => scale_seconds(value),
        UnitFamily::PercentOne => ScaledValue::new(format_fixed2(value * 100.0), "%"),
        UnitFamily::Percent => ScaledValue::new(format_fixed2(value), "%"),
        UnitFamily::Custom => {
            ScaledValue::new(format_plain(value), custom_suffix.unwrap_or_default())
        }
        UnitFamily::Default => ScaledValue::new(format_plain(value), ""),
    }
}

fn scale_bytes(value: f64, rate_suffix: &str) -> ScaledValue {
    let mut scaled = value;
    for unit in BYTE_LADDER {
        if scaled < BYTE_STEP {
            return ScaledValue::new(format_fixed2(scaled), format!("{unit}{rate_suffix}"));
        }
        scaled /= BYTE_STEP;
    }
    ScaledValue::new(
        format_fixed2(scaled),
        format!("{BYTE_CEILING}{rate_suffix}"),
    )
}

fn scale_seconds(value: f64) -> ScaledValue {
    for (unit, divisor) in SECONDS_LADDER {
        let scaled = if value != 0.0 && !value.is_nan() {
            value / divisor
        } else {
            0.0
        };
        if (1.0..1000.0).contains(&scaled) {
            return ScaledValue::new(format_fixed2(scaled), unit);
        }
    }
    ScaledValue::new(format_plain(value), "s")
}

fn format_fixed2(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        format_plain(value)
    }
}

/// Shortest round-trip rendering, with JavaScript names for non-finite values.
pub(crate) fn format_plain(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        }
    } else {
        value.to_string()
    }
}
