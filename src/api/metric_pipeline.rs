use chrono::{DateTime, SecondsFormat};
use tracing::{debug, trace, warn};

use crate::core::{
    ChartType, ChartTypeProfile, MatrixSeries, MetricQueryResult, PanelSchema, Sample,
    VectorSeries,
};

use super::axis_ticks::formatted_value_ticks;
use super::chart_output::{IndicatorNumber, IndicatorTrace, PlotlyFigure, PlotlyTrace, SeriesTrace};
use super::convert_config::ConvertOptions;
use super::layout_builder::{MarginPreset, metric_layout};
use super::legend_namer::legend_name;
use super::theme::ThemeLayoutProvider;
use super::unit_format::{UnitFormatter, format_plain};

const HOVER_TEMPLATE: &str = "%{x} <br>%{fullData.name}: %{hovertext}<extra></extra>";
const INDICATOR_VALUE_FORMAT: &str = ".2f";
const STACK_GROUP: &str = "one";

/// Per-series extremes feeding the y-axis tick range.
#[derive(Debug, Clone, Copy)]
struct SeriesExtent {
    min: f64,
    max: f64,
}

#[derive(Debug, Default)]
struct TraceCollector {
    traces: Vec<PlotlyTrace>,
    extents: Vec<SeriesExtent>,
    margin: Option<MarginPreset>,
}

/// Converts metric query results into a Plotly-style figure.
///
/// Result `i` is named with the legend template of `queries[i]`. Unsupported
/// result kinds contribute nothing; the first supported kind picks the layout
/// margins.
pub(super) fn convert_metric_results<T: ThemeLayoutProvider>(
    schema: &PanelSchema,
    results: &[MetricQueryResult],
    options: &ConvertOptions,
    theme: &T,
) -> PlotlyFigure {
    let chart_type = schema.chart_type;
    let profile = chart_type.profile();
    let formatter = UnitFormatter::from_config(&schema.config);
    let mut collector = TraceCollector::default();

    for (index, result) in results.iter().enumerate() {
        let template = schema.legend_template(index);
        match result {
            MetricQueryResult::Matrix { result } => {
                collector.margin.get_or_insert(if chart_type == ChartType::Metric {
                    MarginPreset::Indicator
                } else {
                    MarginPreset::Range
                });
                collect_matrix(&mut collector, chart_type, &profile, result, template, &formatter);
            }
            MetricQueryResult::Vector { result } => {
                collector.margin.get_or_insert(MarginPreset::Instant);
                collect_vector(&mut collector, chart_type, &profile, result, template);
            }
            MetricQueryResult::Unsupported => {
                warn!(index, "skipping unsupported metric result type");
            }
        }
    }

    let y_ticks = y_tick_range(chart_type, &collector.extents)
        .map(|range| formatted_value_ticks(range, options.value_tick_count, &formatter));
    let margin = collector.margin.unwrap_or(MarginPreset::Instant);
    let layout = metric_layout(
        chart_type,
        &profile.layout,
        &schema.config,
        margin,
        y_ticks.as_ref(),
        theme,
    );

    debug!(
        chart_type = ?chart_type,
        results = results.len(),
        traces = collector.traces.len(),
        has_y_ticks = y_ticks.is_some(),
        "converted metric results"
    );

    PlotlyFigure {
        traces: collector.traces,
        layout,
        y_ticks,
    }
}

fn collect_matrix(
    collector: &mut TraceCollector,
    chart_type: ChartType,
    profile: &ChartTypeProfile,
    result: &[MatrixSeries],
    template: Option<&str>,
    formatter: &UnitFormatter<'_>,
) {
    match chart_type {
        ChartType::Heatmap => {}
        ChartType::Metric => {
            for series in result {
                let Some(latest) = sorted_samples(&series.values).pop() else {
                    trace!("skipping empty matrix series for indicator");
                    continue;
                };
                let scaled = formatter.scale(latest.value().unwrap_or(f64::NAN));
                collector.traces.push(PlotlyTrace::Indicator(IndicatorTrace {
                    name: None,
                    value: scaled.display_value,
                    number: Some(IndicatorNumber {
                        suffix: scaled.unit_suffix,
                        valueformat: INDICATOR_VALUE_FORMAT.to_owned(),
                    }),
                    style: profile.trace,
                }));
            }
        }
        _ => {
            for series in result {
                let samples = sorted_samples(&series.values);
                let y: Vec<Option<f64>> = samples.iter().map(Sample::value).collect();
                if let Some(extent) = extent_of(&y) {
                    collector.extents.push(extent);
                }
                collector.traces.push(PlotlyTrace::Series(SeriesTrace {
                    name: legend_name(&series.metric, template),
                    x: samples.iter().map(|sample| iso_timestamp(sample.timestamp)).collect(),
                    hovertext: y
                        .iter()
                        .map(|value| value.map(|value| formatter.format(value)).unwrap_or_default())
                        .collect(),
                    y,
                    hovertemplate: Some(HOVER_TEMPLATE.to_owned()),
                    stackgroup: (chart_type == ChartType::AreaStacked).then(|| STACK_GROUP.to_owned()),
                    style: profile.trace,
                }));
            }
        }
    }
}

fn collect_vector(
    collector: &mut TraceCollector,
    chart_type: ChartType,
    profile: &ChartTypeProfile,
    result: &[VectorSeries],
    template: Option<&str>,
) {
    match chart_type {
        ChartType::Heatmap => {}
        ChartType::Metric => {
            for series in result {
                let value = series
                    .value
                    .as_ref()
                    .and_then(|sample| sample.raw_value.clone())
                    .unwrap_or_default();
                collector.traces.push(PlotlyTrace::Indicator(IndicatorTrace {
                    name: Some(legend_name(&series.metric, template)),
                    value,
                    number: None,
                    style: profile.trace,
                }));
            }
        }
        _ => {
            for series in result {
                let point = series.value.as_ref();
                collector.traces.push(PlotlyTrace::Series(SeriesTrace {
                    name: legend_name(&series.metric, template),
                    x: point.map(|sample| iso_timestamp(sample.timestamp)).into_iter().collect(),
                    y: point.map(Sample::value).into_iter().collect(),
                    hovertext: Vec::new(),
                    hovertemplate: None,
                    stackgroup: None,
                    style: profile.trace,
                }));
            }
        }
    }
}

/// Samples ordered by timestamp; ties keep their source order.
fn sorted_samples(values: &[Sample]) -> Vec<Sample> {
    let mut samples = values.to_vec();
    samples.sort_by(|left, right| left.timestamp.total_cmp(&right.timestamp));
    samples
}

fn extent_of(values: &[Option<f64>]) -> Option<SeriesExtent> {
    values
        .iter()
        .flatten()
        .copied()
        .filter(|value| value.is_finite())
        .fold(None, |extent, value| {
            Some(match extent {
                None => SeriesExtent { min: value, max: value },
                Some(SeriesExtent { min, max }) => SeriesExtent {
                    min: min.min(value),
                    max: max.max(value),
                },
            })
        })
}

/// `(min, max)` of the y-axis ticks.
///
/// Stacked areas are sized to the sum of per-series maxima; everything else to
/// the largest maximum. Both start from zero, the minimum is the global one.
fn y_tick_range(chart_type: ChartType, extents: &[SeriesExtent]) -> Option<(f64, f64)> {
    if extents.is_empty() {
        return None;
    }
    let max = if chart_type == ChartType::AreaStacked {
        extents.iter().map(|extent| extent.max).sum()
    } else {
        extents.iter().map(|extent| extent.max).fold(0.0, f64::max)
    };
    let min = extents
        .iter()
        .map(|extent| extent.min)
        .fold(f64::INFINITY, f64::min);
    Some((min, max))
}

/// ISO-8601 with millisecond precision and an explicit `+00:00` offset.
fn iso_timestamp(seconds: f64) -> String {
    let millis = (seconds * 1000.0).round();
    if millis.is_finite() {
        if let Some(moment) = DateTime::from_timestamp_millis(millis as i64) {
            return moment.to_rfc3339_opts(SecondsFormat::Millis, false);
        }
    }
    format_plain(seconds)
}
