use indexmap::IndexSet;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::core::cell::CellKey;
use crate::core::{
    CellValue, DataShape, FieldDescriptor, PanelFields, PanelSchema, PieStyle, SeriesKind,
    SeriesStyle, TabularRow,
};

use super::axis_ticks::{sample_category_ticks, truncate_tick_label};
use super::chart_output::{
    AxisOption, DataZoomOption, EChartsOption, EChartsSeries, Emphasis, GridOption, ItemShadow,
    LabelLine, LegendOption, PieRadius, PieSlice, SeriesData, SeriesLabel, TabularChart,
    TooltipOption,
};
use super::convert_config::ConvertOptions;
use super::layout_builder::{CategoryTicks, tabular_layout};
use super::theme::ThemeLayoutProvider;
use super::timeseries::{TimeAxisCorrection, histogram_bucket_millis, resolve_category_axis};

const PIE_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.5)";

/// Column aliases per axis role, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisKeys<'a> {
    pub x: Vec<&'a str>,
    pub y: Vec<&'a str>,
    pub z: Vec<&'a str>,
}

impl<'a> AxisKeys<'a> {
    #[must_use]
    pub fn from_fields(fields: &'a PanelFields) -> Self {
        Self {
            x: aliases(&fields.x),
            y: aliases(&fields.y),
            z: aliases(&fields.z),
        }
    }
}

fn aliases(descriptors: &[FieldDescriptor]) -> Vec<&str> {
    descriptors.iter().map(|field| field.alias.as_str()).collect()
}

/// Values of `alias` across `rows`, skipping rows that lack the column.
///
/// `null` cells are kept. With `histogram_millis` set, values are read as
/// timestamps and converted to epoch milliseconds.
#[must_use]
pub fn project_column(rows: &[TabularRow], alias: &str, histogram_millis: bool) -> Vec<CellValue> {
    rows.iter()
        .filter_map(|row| row.get(alias))
        .map(|value| {
            if histogram_millis {
                histogram_bucket_millis(value)
            } else {
                value.clone()
            }
        })
        .collect()
}

/// Intermediate result of shaping rows into series, before axis placement.
#[derive(Debug, Default)]
struct ShapedSeries {
    categories: Vec<CellValue>,
    series: Vec<EChartsSeries>,
    /// Second categorical axis (heatmap rows).
    row_categories: Option<Vec<CellValue>>,
}

/// Converts tabular rows into an ECharts option plus the matching layout.
pub(super) fn convert_tabular_rows<T: ThemeLayoutProvider>(
    schema: &PanelSchema,
    rows: &[TabularRow],
    options: &ConvertOptions,
    theme: &T,
) -> TabularChart {
    let chart_type = schema.chart_type;
    let profile = chart_type.profile();
    let default_fields = PanelFields::default();
    let fields = schema
        .primary_query()
        .map_or(&default_fields, |query| &query.fields);
    let keys = AxisKeys::from_fields(fields);
    let histogram_over_timestamp = fields
        .x
        .first()
        .is_some_and(|field| field.is_time_histogram(&options.timestamp_column));

    let primary = keys
        .x
        .first()
        .map(|alias| project_column(rows, alias, histogram_over_timestamp))
        .unwrap_or_default();

    let mut shaped = match profile.shape {
        DataShape::PerValueColumn => per_value_column(rows, fields, &keys, primary.clone()),
        DataShape::PieSlices => pie_slices(rows, &keys, &primary),
        DataShape::Stacked => stacked(rows, &keys, histogram_over_timestamp),
        DataShape::Heatmap => heatmap(rows, &keys),
        DataShape::Indicator => indicator(rows, &keys, primary.clone()),
        DataShape::None => ShapedSeries {
            categories: primary.clone(),
            ..ShapedSeries::default()
        },
    };
    for series in &mut shaped.series {
        decorate(series, &profile.series);
    }

    let time_correctable = matches!(
        profile.shape,
        DataShape::PerValueColumn | DataShape::Stacked | DataShape::None
    );
    let (category_axis, correction) = if time_correctable {
        resolve_category_axis(
            shaped.categories,
            &mut shaped.series,
            histogram_over_timestamp,
            options.timeseries_sample_size,
        )
    } else {
        (
            AxisOption::category(shaped.categories),
            TimeAxisCorrection::Unchanged,
        )
    };

    let value_axis = match shaped.row_categories {
        Some(row_values) => AxisOption {
            position: Some("left".to_owned()),
            ..AxisOption::category(row_values)
        },
        None => AxisOption::value(),
    };
    let (x_axis, y_axis) = if profile.layout.swapped_axes {
        (value_axis, category_axis)
    } else {
        (category_axis, value_axis)
    };

    let option = EChartsOption {
        legend: LegendOption::default(),
        grid: GridOption::default(),
        tooltip: if profile.layout.item_focused {
            TooltipOption::item()
        } else {
            TooltipOption::axis()
        },
        x_axis,
        y_axis,
        data_zoom: vec![DataZoomOption::inside_x()],
        series: shaped.series,
    };

    let ticks = category_ticks(&primary, options);
    let layout = tabular_layout(chart_type, &profile.layout, &schema.config, fields, &ticks, theme);

    debug!(
        chart_type = ?chart_type,
        rows = rows.len(),
        series = option.series.len(),
        time_axis = ?correction,
        "converted tabular rows"
    );

    TabularChart { option, layout }
}

fn per_value_column(
    rows: &[TabularRow],
    fields: &PanelFields,
    keys: &AxisKeys<'_>,
    categories: Vec<CellValue>,
) -> ShapedSeries {
    let series = keys
        .y
        .iter()
        .zip(&fields.y)
        .map(|(alias, field)| {
            let mut series = EChartsSeries::new(
                SeriesKind::Bar,
                SeriesData::Values(project_column(rows, alias, false)),
            );
            series.name = Some(field.label.clone());
            series
        })
        .collect();
    ShapedSeries {
        categories,
        series,
        row_categories: None,
    }
}

/// One pie per y column. Slice names are drawn from the category list with a
/// single counter shared by every pie, and the category axis ends up empty.
fn pie_slices(rows: &[TabularRow], keys: &AxisKeys<'_>, categories: &[CellValue]) -> ShapedSeries {
    let mut next_name = categories.iter();
    let series = keys
        .y
        .iter()
        .map(|alias| {
            let slices = project_column(rows, alias, false)
                .into_iter()
                .map(|value| PieSlice {
                    value,
                    name: next_name.next().cloned().unwrap_or(CellValue::Null),
                })
                .collect();
            EChartsSeries::new(SeriesKind::Bar, SeriesData::Slices(slices))
        })
        .collect();
    ShapedSeries {
        categories: Vec::new(),
        series,
        row_categories: None,
    }
}

/// One series per distinct discriminator (second x column), zero-filled over
/// the distinct primary categories.
fn stacked(rows: &[TabularRow], keys: &AxisKeys<'_>, histogram_millis: bool) -> ShapedSeries {
    let (Some(&primary_key), Some(&discriminator_key)) = (keys.x.first(), keys.x.get(1)) else {
        warn!(columns = keys.x.len(), "stacked chart without a discriminator column");
        return ShapedSeries::default();
    };
    let value_key = keys.y.first().copied();

    let primary = distinct(project_column(rows, primary_key, false));
    let discriminators = distinct_truthy(rows, discriminator_key);

    let series = discriminators
        .iter()
        .map(|discriminator| {
            let data = primary
                .iter()
                .map(|category| {
                    first_match(rows, &[(primary_key, category), (discriminator_key, discriminator)])
                        .and_then(|row| value_key.and_then(|key| row.get(key)))
                        .filter(|value| value.is_truthy())
                        .cloned()
                        .unwrap_or(CellValue::Number(0.0))
                })
                .collect();
            let mut series = EChartsSeries::new(SeriesKind::Bar, SeriesData::Values(data));
            series.name = Some(discriminator.to_string());
            series
        })
        .collect();

    let categories = if histogram_millis {
        primary.iter().map(histogram_bucket_millis).collect()
    } else {
        primary
    };
    ShapedSeries {
        categories,
        series,
        row_categories: None,
    }
}

/// z values over distinct x (columns) and distinct y (rows). Only a missing
/// row or z cell is a `null` gap; a present zero stays zero.
fn heatmap(rows: &[TabularRow], keys: &AxisKeys<'_>) -> ShapedSeries {
    let (Some(&x_key), Some(&y_key), Some(&z_key)) = (keys.x.first(), keys.y.first(), keys.z.first())
    else {
        warn!(
            x = keys.x.len(),
            y = keys.y.len(),
            z = keys.z.len(),
            "heatmap chart without x, y and z columns"
        );
        return ShapedSeries::default();
    };

    let columns = distinct_truthy(rows, x_key);
    let row_values = distinct_truthy(rows, y_key);
    let matrix = row_values
        .iter()
        .map(|row_value| {
            columns
                .iter()
                .map(|column| {
                    first_match(rows, &[(x_key, column), (y_key, row_value)])
                        .and_then(|row| row.get(z_key))
                        .cloned()
                        .unwrap_or(CellValue::Null)
                })
                .collect()
        })
        .collect();

    let mut series = EChartsSeries::new(SeriesKind::Heatmap, SeriesData::Matrix(matrix));
    series.hoverongaps = Some(false);
    ShapedSeries {
        categories: columns,
        series: vec![series],
        row_categories: Some(row_values),
    }
}

fn indicator(rows: &[TabularRow], keys: &AxisKeys<'_>, categories: Vec<CellValue>) -> ShapedSeries {
    let value = keys
        .y
        .first()
        .and_then(|alias| project_column(rows, alias, false).into_iter().next())
        .unwrap_or(CellValue::Number(0.0));
    ShapedSeries {
        categories,
        series: vec![EChartsSeries::new(
            SeriesKind::Indicator,
            SeriesData::Scalar(value),
        )],
        row_categories: None,
    }
}

/// Applies the chart type's series kind and decoration.
fn decorate(series: &mut EChartsSeries, style: &SeriesStyle) {
    series.kind = style.kind;
    if style.smooth {
        series.smooth = Some(true);
    }
    if style.area_fill {
        series.area_style = Some(Map::new());
    }
    if let Some(group) = style.stack {
        series.stack = Some(group.to_owned());
    }
    if style.focus_series {
        series.emphasis = Some(Emphasis {
            focus: Some("series".to_owned()),
            ..Emphasis::default()
        });
    }
    series.symbol_size = style.symbol_size;

    let Some(pie) = style.pie else {
        return;
    };
    series.avoid_label_overlap = Some(false);
    series.label = Some(SeriesLabel {
        show: true,
        formatter: Some("{d}%".to_owned()),
        position: Some("inside".to_owned()),
        ..SeriesLabel::default()
    });
    match pie {
        PieStyle::Filled => {
            series.radius = Some(PieRadius::Disc("50%".to_owned()));
            series.emphasis = Some(Emphasis {
                item_style: Some(ItemShadow {
                    shadow_blur: 10,
                    shadow_offset_x: 0,
                    shadow_color: PIE_SHADOW_COLOR.to_owned(),
                }),
                label: Some(SeriesLabel {
                    show: true,
                    ..SeriesLabel::default()
                }),
                ..Emphasis::default()
            });
        }
        PieStyle::Ring => {
            series.radius = Some(PieRadius::Ring("40%".to_owned(), "70%".to_owned()));
            series.emphasis = Some(Emphasis {
                label: Some(SeriesLabel {
                    show: true,
                    font_size: Some(12),
                    font_weight: Some("bold".to_owned()),
                    ..SeriesLabel::default()
                }),
                ..Emphasis::default()
            });
            series.label_line = Some(LabelLine { show: false });
        }
    }
}

fn category_ticks(primary: &[CellValue], options: &ConvertOptions) -> CategoryTicks {
    let sampled = sample_category_ticks(primary, options.category_tick_budget());
    let text = sampled
        .iter()
        .map(|value| match value {
            CellValue::Null => Value::Null,
            other => Value::String(truncate_tick_label(
                &other.to_string(),
                options.tick_label_max_chars,
            )),
        })
        .collect();
    CategoryTicks {
        values: sampled.iter().map(cell_json).collect(),
        text,
    }
}

fn cell_json(value: &CellValue) -> Value {
    match value {
        CellValue::Null => Value::Null,
        CellValue::Bool(flag) => Value::Bool(*flag),
        CellValue::Number(number) => serde_json::Number::from_f64(*number)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        CellValue::Text(text) => Value::String(text.clone()),
    }
}

/// Distinct values in first-seen order.
fn distinct(values: Vec<CellValue>) -> Vec<CellValue> {
    let mut seen = IndexSet::<CellKey>::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.distinct_key()))
        .collect()
}

/// Distinct truthy values of `alias` in first-seen order.
fn distinct_truthy(rows: &[TabularRow], alias: &str) -> Vec<CellValue> {
    distinct(
        rows.iter()
            .filter_map(|row| row.get(alias))
            .filter(|value| value.is_truthy())
            .cloned()
            .collect(),
    )
}

/// First row whose cells loosely equal every `(alias, expected)` pair. A
/// missing cell compares as `null`.
fn first_match<'r>(rows: &'r [TabularRow], criteria: &[(&str, &CellValue)]) -> Option<&'r TabularRow> {
    rows.iter().find(|row| {
        criteria.iter().all(|(alias, expected)| {
            row.get(*alias)
                .unwrap_or(&CellValue::Null)
                .loose_eq(expected)
        })
    })
}
