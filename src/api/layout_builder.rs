use serde_json::{Map, Value, json};

use crate::core::{ChartType, LayoutProfile, LegendPosition, PanelConfig, PanelFields, TickPlacement};

use super::axis_ticks::ValueTicks;
use super::chart_output::{LayoutFragment, Pipeline};
use super::theme::{ThemeLayoutProvider, merge_layout_fragment};

const TABULAR_LEGEND_BACKGROUND: &str = "#0000000b";
const HEATMAP_AXIS_SIZE_PX: u32 = 700;

/// Layout margin preset. The metric pipeline picks one from the result kind;
/// tabular layouts always use [`MarginPreset::Instant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MarginPreset {
    /// Range vectors: room for the unit-formatted y ticks.
    Range,
    /// Instant vectors and tabular charts.
    Instant,
    /// Single-number indicators.
    Indicator,
}

/// Sampled category ticks ready to attach to an axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct CategoryTicks {
    pub values: Vec<Value>,
    pub text: Vec<Value>,
}

pub(super) fn legend_orientation(position: Option<LegendPosition>, pipeline: Pipeline) -> &'static str {
    match (position.unwrap_or_default(), pipeline) {
        (LegendPosition::Bottom, _) => "h",
        (LegendPosition::Right, _) => "v",
        (LegendPosition::Auto, Pipeline::Metric) => "h",
        (LegendPosition::Auto, Pipeline::Tabular) => "v",
    }
}

/// Layout for the metric (Plotly-style) pipeline.
///
/// Unit-formatted y ticks are attached only when the panel configures a unit
/// family; otherwise the engine autoranges.
pub(super) fn metric_layout<T: ThemeLayoutProvider>(
    chart_type: ChartType,
    profile: &LayoutProfile,
    config: &PanelConfig,
    margin: MarginPreset,
    y_ticks: Option<&ValueTicks>,
    theme: &T,
) -> LayoutFragment {
    let mut layout = base_layout(config);
    layout.insert(
        "legend".to_owned(),
        json!({
            "orientation": legend_orientation(config.legends_position, Pipeline::Metric),
            "itemclick": false,
        }),
    );
    layout.insert("margin".to_owned(), margin_for(margin, chart_type));

    if margin == MarginPreset::Range {
        let mut yaxis = Map::new();
        yaxis.insert("automargin".to_owned(), json!(true));
        yaxis.insert("autorange".to_owned(), json!(true));
        if let (Some(_), Some(ticks)) = (config.unit, y_ticks) {
            yaxis.insert("tickvals".to_owned(), json!(ticks.values.as_slice()));
            yaxis.insert("ticktext".to_owned(), json!(ticks.labels));
        }
        layout.insert("yaxis".to_owned(), Value::Object(yaxis));
    }

    insert_modes(&mut layout, profile);
    merge_layout_fragment(&mut layout, theme.resolve_theme_layout());
    layout
}

/// Layout for the tabular pipeline.
pub(super) fn tabular_layout<T: ThemeLayoutProvider>(
    chart_type: ChartType,
    profile: &LayoutProfile,
    config: &PanelConfig,
    fields: &PanelFields,
    ticks: &CategoryTicks,
    theme: &T,
) -> LayoutFragment {
    let mut layout = base_layout(config);
    layout.insert(
        "legend".to_owned(),
        json!({
            "bgcolor": TABULAR_LEGEND_BACKGROUND,
            "orientation": legend_orientation(config.legends_position, Pipeline::Tabular),
            "itemclick": if profile.item_focused { json!("toggle") } else { json!(false) },
        }),
    );
    layout.insert(
        "margin".to_owned(),
        margin_for(MarginPreset::Instant, chart_type),
    );

    insert_modes(&mut layout, profile);
    if chart_type == ChartType::Metric {
        layout.insert("paper_bgcolor".to_owned(), json!("white"));
    } else {
        let (xaxis, yaxis) = tabular_axes(chart_type, profile, fields, ticks);
        layout.insert("xaxis".to_owned(), Value::Object(xaxis));
        layout.insert("yaxis".to_owned(), Value::Object(yaxis));
    }

    merge_layout_fragment(&mut layout, theme.resolve_theme_layout());
    layout
}

fn base_layout(config: &PanelConfig) -> LayoutFragment {
    let mut layout = LayoutFragment::new();
    layout.insert("title".to_owned(), json!(false));
    if let Some(show) = config.show_legends {
        layout.insert("showlegend".to_owned(), json!(show));
    }
    layout.insert("autosize".to_owned(), json!(true));
    layout
}

fn margin_for(margin: MarginPreset, chart_type: ChartType) -> Value {
    match margin {
        MarginPreset::Range => json!({ "autoexpand": true, "r": 50, "b": 50, "t": 30 }),
        MarginPreset::Instant => {
            let side = |wide: u32, narrow: u32| {
                if chart_type == ChartType::Pie { wide } else { narrow }
            };
            json!({ "l": side(60, 32), "r": side(60, 16), "t": 38, "b": 32 })
        }
        MarginPreset::Indicator => {
            json!({ "autoexpand": true, "l": 10, "r": 10, "t": 0, "b": 0 })
        }
    }
}

fn insert_modes(layout: &mut LayoutFragment, profile: &LayoutProfile) {
    if let Some(bar_mode) = profile.bar_mode {
        layout.insert("barmode".to_owned(), json!(bar_mode));
    }
    if let Some(scatter_mode) = profile.scatter_mode {
        layout.insert("scattermode".to_owned(), json!(scatter_mode));
    }
}

fn attach_ticks(axis: &mut Map<String, Value>, ticks: &CategoryTicks) {
    axis.insert("tickmode".to_owned(), json!("array"));
    axis.insert("tickvals".to_owned(), Value::Array(ticks.values.clone()));
    axis.insert("ticktext".to_owned(), Value::Array(ticks.text.clone()));
}

fn tabular_axes(
    chart_type: ChartType,
    profile: &LayoutProfile,
    fields: &PanelFields,
    ticks: &CategoryTicks,
) -> (Map<String, Value>, Map<String, Value>) {
    let x_label = fields.x.first().map(|field| field.label.as_str()).unwrap_or_default();
    let y_label = fields.y.first().map(|field| field.label.as_str()).unwrap_or_default();
    let single_y_label = if fields.y.len() == 1 { y_label } else { "" };
    let histogram_x = fields.x.first().is_some_and(|field| field.is_histogram());

    let wants_ticks = match profile.ticks {
        TickPlacement::CategoryAxisWhenSingleX => fields.x.len() == 1,
        TickPlacement::CategoryAxisUnlessHistogram => !fields.x.is_empty() && !histogram_x,
        TickPlacement::CategoryAxisAlways => true,
        TickPlacement::ValueAxis | TickPlacement::None => false,
    };

    if profile.ticks == TickPlacement::ValueAxis {
        let xaxis = object(json!({ "title": x_label, "tickangle": -20, "automargin": true }));
        let mut yaxis = object(json!({ "title": single_y_label, "automargin": true }));
        attach_ticks(&mut yaxis, ticks);
        return (xaxis, yaxis);
    }

    if profile.swapped_axes {
        let single_x_label = if fields.x.len() == 1 { x_label } else { "" };
        let value_axis = object(json!({
            "title": y_label,
            "tickangle": -20,
            "automargin": true,
            "fixedrange": true,
        }));
        let mut category_axis = object(json!({ "title": single_x_label, "automargin": true }));
        if wants_ticks {
            attach_ticks(&mut category_axis, ticks);
        }
        return (value_axis, category_axis);
    }

    let mut category_axis = object(json!({
        "title": x_label,
        "tickangle": if histogram_x { 0 } else { -20 },
        "automargin": true,
    }));
    if wants_ticks {
        attach_ticks(&mut category_axis, ticks);
    }
    let mut value_axis = object(json!({
        "title": single_y_label,
        "automargin": true,
        "fixedrange": true,
    }));
    if chart_type == ChartType::Heatmap {
        value_axis.insert("autosize".to_owned(), json!(true));
        value_axis.insert("width".to_owned(), json!(HEATMAP_AXIS_SIZE_PX));
        value_axis.insert("height".to_owned(), json!(HEATMAP_AXIS_SIZE_PX));
    }
    (category_axis, value_axis)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::theme::NoTheme;
    use crate::core::FieldDescriptor;

    fn ticks() -> CategoryTicks {
        CategoryTicks {
            values: vec![json!("a"), json!("b")],
            text: vec![json!("a"), json!("b")],
        }
    }

    #[test]
    fn legend_orientation_defaults_differ_by_pipeline() {
        assert_eq!(legend_orientation(None, Pipeline::Metric), "h");
        assert_eq!(legend_orientation(None, Pipeline::Tabular), "v");
        assert_eq!(legend_orientation(Some(LegendPosition::Right), Pipeline::Metric), "v");
        assert_eq!(legend_orientation(Some(LegendPosition::Bottom), Pipeline::Tabular), "h");
    }

    #[test]
    fn histogram_x_keeps_labels_flat_and_skips_stacked_ticks() {
        let fields = PanelFields::default()
            .with_x(FieldDescriptor::new("t").with_aggregation("histogram"))
            .with_x(FieldDescriptor::new("host"))
            .with_y(FieldDescriptor::new("count").with_label("Count"));
        let layout = tabular_layout(
            ChartType::Stacked,
            &ChartType::Stacked.profile().layout,
            &PanelConfig::default(),
            &fields,
            &ticks(),
            &NoTheme,
        );
        assert_eq!(layout["xaxis"]["tickangle"], json!(0));
        assert!(layout["xaxis"].get("tickvals").is_none());
        assert_eq!(layout["yaxis"]["title"], json!("Count"));
        assert_eq!(layout["barmode"], json!("stack"));
    }

    #[test]
    fn horizontal_bars_put_ticks_on_y() {
        let fields = PanelFields::default()
            .with_x(FieldDescriptor::new("host").with_label("Host"))
            .with_y(FieldDescriptor::new("count").with_label("Count"));
        let layout = tabular_layout(
            ChartType::HBar,
            &ChartType::HBar.profile().layout,
            &PanelConfig::default(),
            &fields,
            &ticks(),
            &NoTheme,
        );
        assert_eq!(layout["xaxis"]["title"], json!("Count"));
        assert_eq!(layout["yaxis"]["title"], json!("Host"));
        assert_eq!(layout["yaxis"]["tickvals"], json!(["a", "b"]));
        assert_eq!(layout["barmode"], json!("group"));
    }

    #[test]
    fn margin_presets_widen_pie_sides() {
        assert_eq!(margin_for(MarginPreset::Instant, ChartType::Pie)["l"], json!(60));
        assert_eq!(margin_for(MarginPreset::Instant, ChartType::Bar)["r"], json!(16));
        assert_eq!(margin_for(MarginPreset::Range, ChartType::Pie)["r"], json!(50));
        assert_eq!(margin_for(MarginPreset::Indicator, ChartType::Metric)["t"], json!(0));
    }

    #[test]
    fn pie_layout_toggles_legend_items() {
        let layout = tabular_layout(
            ChartType::Pie,
            &ChartType::Pie.profile().layout,
            &PanelConfig::default().with_show_legends(true),
            &PanelFields::default(),
            &ticks(),
            &NoTheme,
        );
        assert_eq!(layout["legend"]["itemclick"], json!("toggle"));
        assert_eq!(layout["margin"]["l"], json!(60));
        assert_eq!(layout["showlegend"], json!(true));
        assert_eq!(layout["yaxis"]["tickmode"], json!("array"));
    }
}
