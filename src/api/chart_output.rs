use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::{CellValue, SeriesKind, TraceStyle};

use super::axis_ticks::ValueTicks;

/// Free-form layout object handed to the charting engine.
pub type LayoutFragment = Map<String, Value>;

/// Which pipeline produced a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pipeline {
    Metric,
    Tabular,
}

/// Final configuration returned to the caller.
///
/// The two shapes are not interchangeable: metric results render as
/// Plotly-style `{traces, layout}`, tabular results as an ECharts `{option}`
/// plus the accompanying layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartConfiguration {
    Metric(PlotlyFigure),
    Tabular(TabularChart),
}

impl ChartConfiguration {
    #[must_use]
    pub fn pipeline(&self) -> Pipeline {
        match self {
            ChartConfiguration::Metric(_) => Pipeline::Metric,
            ChartConfiguration::Tabular(_) => Pipeline::Tabular,
        }
    }

    #[must_use]
    pub fn as_metric(&self) -> Option<&PlotlyFigure> {
        match self {
            ChartConfiguration::Metric(figure) => Some(figure),
            ChartConfiguration::Tabular(_) => None,
        }
    }

    #[must_use]
    pub fn as_tabular(&self) -> Option<&TabularChart> {
        match self {
            ChartConfiguration::Tabular(chart) => Some(chart),
            ChartConfiguration::Metric(_) => None,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutFragment {
        match self {
            ChartConfiguration::Metric(figure) => &figure.layout,
            ChartConfiguration::Tabular(chart) => &chart.layout,
        }
    }

    /// Number of drawable traces/series.
    #[must_use]
    pub fn series_count(&self) -> usize {
        match self {
            ChartConfiguration::Metric(figure) => figure.traces.len(),
            ChartConfiguration::Tabular(chart) => chart.option.series.len(),
        }
    }

    /// `true` when nothing would be drawn. Conversion never fails, so this is
    /// how callers detect "no data".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series_count() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotlyFigure {
    pub traces: Vec<PlotlyTrace>,
    pub layout: LayoutFragment,
    /// Y-axis ticks derived from range vectors, whether or not they were
    /// attached to the layout.
    #[serde(skip)]
    pub y_ticks: Option<ValueTicks>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlotlyTrace {
    Series(SeriesTrace),
    Indicator(IndicatorTrace),
}

impl PlotlyTrace {
    #[must_use]
    pub fn as_series(&self) -> Option<&SeriesTrace> {
        match self {
            PlotlyTrace::Series(trace) => Some(trace),
            PlotlyTrace::Indicator(_) => None,
        }
    }

    #[must_use]
    pub fn as_indicator(&self) -> Option<&IndicatorTrace> {
        match self {
            PlotlyTrace::Indicator(trace) => Some(trace),
            PlotlyTrace::Series(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesTrace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hovertext: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stackgroup: Option<String>,
    #[serde(flatten)]
    pub style: TraceStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<IndicatorNumber>,
    #[serde(flatten)]
    pub style: TraceStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorNumber {
    pub suffix: String,
    pub valueformat: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularChart {
    pub option: EChartsOption,
    pub layout: LayoutFragment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EChartsOption {
    pub legend: LegendOption,
    pub grid: GridOption,
    pub tooltip: TooltipOption,
    pub x_axis: AxisOption,
    pub y_axis: AxisOption,
    pub data_zoom: Vec<DataZoomOption>,
    pub series: Vec<EChartsSeries>,
}

impl EChartsOption {
    /// The axis carrying categories (or time), whichever side it is drawn on.
    #[must_use]
    pub fn category_axis(&self) -> &AxisOption {
        if self.y_axis.axis_type != AxisType::Value && self.x_axis.axis_type == AxisType::Value {
            &self.y_axis
        } else {
            &self.x_axis
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendOption {
    pub show: bool,
    #[serde(rename = "type")]
    pub legend_type: String,
    pub orient: String,
    pub x: String,
    pub y: String,
}

impl Default for LegendOption {
    fn default() -> Self {
        Self {
            show: true,
            legend_type: "scroll".to_owned(),
            orient: "vertical".to_owned(),
            x: "right".to_owned(),
            y: "center".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOption {
    pub contain_label: bool,
    pub left: String,
    pub top: String,
    pub bottom: String,
}

impl Default for GridOption {
    fn default() -> Self {
        Self {
            contain_label: true,
            left: "2%".to_owned(),
            top: "10%".to_owned(),
            bottom: "10%".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    Axis,
    Item,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOption {
    pub trigger: TooltipTrigger,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_pointer: Option<AxisPointer>,
}

impl TooltipOption {
    #[must_use]
    pub fn axis() -> Self {
        Self {
            trigger: TooltipTrigger::Axis,
            axis_pointer: Some(AxisPointer {
                pointer_type: "cross".to_owned(),
            }),
        }
    }

    #[must_use]
    pub fn item() -> Self {
        Self {
            trigger: TooltipTrigger::Item,
            axis_pointer: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisPointer {
    #[serde(rename = "type")]
    pub pointer_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Category,
    Value,
    Time,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOption {
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Discrete categories; `None` for value axes, empty for time axes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<CellValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_tick: Option<AxisTick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_line: Option<SplitLine>,
}

impl AxisOption {
    #[must_use]
    pub fn category(data: Vec<CellValue>) -> Self {
        Self {
            axis_type: AxisType::Category,
            position: Some("bottom".to_owned()),
            data: Some(data),
            axis_tick: Some(AxisTick {
                align_with_label: true,
            }),
            min: Some("dataMin".to_owned()),
            max: Some("dataMax".to_owned()),
            split_line: Some(SplitLine { show: true }),
        }
    }

    #[must_use]
    pub fn value() -> Self {
        Self {
            axis_type: AxisType::Value,
            position: None,
            data: None,
            axis_tick: None,
            min: None,
            max: None,
            split_line: None,
        }
    }

    /// Category slots, empty for value and time axes.
    #[must_use]
    pub fn categories(&self) -> &[CellValue] {
        self.data.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTick {
    pub align_with_label: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitLine {
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataZoomOption {
    #[serde(rename = "type")]
    pub zoom_type: String,
    pub x_axis_index: Vec<usize>,
    pub start: u32,
    pub end: u32,
}

impl DataZoomOption {
    #[must_use]
    pub fn inside_x() -> Self {
        Self {
            zoom_type: "inside".to_owned(),
            x_axis_index: vec![0],
            start: 0,
            end: 100,
        }
    }
}

/// Series payload; the variant follows the chart type's data shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    /// Values aligned positionally with the category axis.
    Values(Vec<CellValue>),
    /// `(x, y)` pairs on a continuous time axis.
    Points(Vec<(CellValue, CellValue)>),
    Slices(Vec<PieSlice>),
    /// Rows follow the y axis, columns the x axis; `null` marks a gap.
    Matrix(Vec<Vec<CellValue>>),
    Scalar(CellValue),
}

impl SeriesData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Values(values) => values.len(),
            SeriesData::Points(points) => points.len(),
            SeriesData::Slices(slices) => slices.len(),
            SeriesData::Matrix(rows) => rows.len(),
            SeriesData::Scalar(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub value: CellValue,
    pub name: CellValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EChartsSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub data: SeriesData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smooth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_style: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<Emphasis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<PieRadius>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_label_overlap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<SeriesLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_line: Option<LabelLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverongaps: Option<bool>,
}

impl EChartsSeries {
    #[must_use]
    pub fn new(kind: SeriesKind, data: SeriesData) -> Self {
        Self {
            name: None,
            kind,
            data,
            smooth: None,
            area_style: None,
            stack: None,
            emphasis: None,
            symbol_size: None,
            radius: None,
            avoid_label_overlap: None,
            label: None,
            label_line: None,
            hoverongaps: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PieRadius {
    Disc(String),
    Ring(String, String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Emphasis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_style: Option<ItemShadow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<SeriesLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemShadow {
    pub shadow_blur: u32,
    pub shadow_offset_x: i32,
    pub shadow_color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesLabel {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelLine {
    pub show: bool,
}
