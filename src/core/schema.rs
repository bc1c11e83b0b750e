use serde::{Deserialize, Serialize};

use super::ChartType;

/// Declarative description of one dashboard panel.
///
/// Only the parts that influence chart construction are modeled; unknown keys
/// in the source document are ignored when decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSchema {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    #[serde(default)]
    pub queries: Vec<PanelQuery>,
    #[serde(default)]
    pub config: PanelConfig,
}

impl PanelSchema {
    #[must_use]
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            queries: Vec::new(),
            config: PanelConfig::default(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: PanelQuery) -> Self {
        self.queries.push(query);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: PanelConfig) -> Self {
        self.config = config;
        self
    }

    /// First query; tabular panels are always driven by it.
    #[must_use]
    pub fn primary_query(&self) -> Option<&PanelQuery> {
        self.queries.first()
    }

    /// Legend template configured for the sub-query at `index`.
    #[must_use]
    pub fn legend_template(&self, index: usize) -> Option<&str> {
        self.queries
            .get(index)
            .and_then(|query| query.promql_legend.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelQuery {
    #[serde(default)]
    pub fields: PanelFields,
    /// Legend template with `{label}` placeholders, metric pipeline only.
    #[serde(default)]
    pub promql_legend: Option<String>,
}

impl PanelQuery {
    #[must_use]
    pub fn new(fields: PanelFields) -> Self {
        Self {
            fields,
            promql_legend: None,
        }
    }

    #[must_use]
    pub fn with_legend_template(mut self, template: impl Into<String>) -> Self {
        self.promql_legend = Some(template.into());
        self
    }
}

/// Ordered column descriptors per axis role.
///
/// `x[0]` is the primary category/time axis, `x[1]` (when present) the
/// stacking discriminator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelFields {
    #[serde(default)]
    pub x: Vec<FieldDescriptor>,
    #[serde(default)]
    pub y: Vec<FieldDescriptor>,
    #[serde(default)]
    pub z: Vec<FieldDescriptor>,
}

impl PanelFields {
    #[must_use]
    pub fn with_x(mut self, field: FieldDescriptor) -> Self {
        self.x.push(field);
        self
    }

    #[must_use]
    pub fn with_y(mut self, field: FieldDescriptor) -> Self {
        self.y.push(field);
        self
    }

    #[must_use]
    pub fn with_z(mut self, field: FieldDescriptor) -> Self {
        self.z.push(field);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub alias: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub aggregation_function: Option<String>,
    #[serde(default)]
    pub column: Option<String>,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(alias: impl Into<String>) -> Self {
        let alias = alias.into();
        Self {
            label: alias.clone(),
            alias,
            aggregation_function: None,
            column: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_aggregation(mut self, function: impl Into<String>) -> Self {
        self.aggregation_function = Some(function.into());
        self
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub fn is_histogram(&self) -> bool {
        self.aggregation_function.as_deref() == Some("histogram")
    }

    /// Histogram bucketing over the designated timestamp column.
    #[must_use]
    pub fn is_time_histogram(&self, timestamp_column: &str) -> bool {
        self.is_histogram() && self.column.as_deref() == Some(timestamp_column)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub unit: Option<UnitFamily>,
    #[serde(default)]
    pub unit_custom: Option<String>,
    #[serde(default)]
    pub show_legends: Option<bool>,
    #[serde(default)]
    pub legends_position: Option<LegendPosition>,
}

impl PanelConfig {
    #[must_use]
    pub fn with_unit(mut self, unit: UnitFamily) -> Self {
        self.unit = Some(unit);
        self
    }

    #[must_use]
    pub fn with_unit_custom(mut self, suffix: impl Into<String>) -> Self {
        self.unit_custom = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn with_show_legends(mut self, show: bool) -> Self {
        self.show_legends = Some(show);
        self
    }

    #[must_use]
    pub fn with_legends_position(mut self, position: LegendPosition) -> Self {
        self.legends_position = Some(position);
        self
    }
}

/// Unit family used to scale values for hover text and tick labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitFamily {
    Bytes,
    Bps,
    Seconds,
    #[serde(rename = "percent-1")]
    PercentOne,
    Percent,
    Custom,
    #[default]
    #[serde(other)]
    Default,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Bottom,
    Right,
    #[default]
    #[serde(other)]
    Auto,
}
