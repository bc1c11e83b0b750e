use panel_chart::api::{
    AxisType, ConvertOptions, PieRadius, SeriesData, TabularChart, TooltipTrigger, convert_panel,
};
use panel_chart::core::{
    CellValue, ChartType, FieldDescriptor, PanelFields, PanelQuery, PanelSchema, RawResultSet,
    SeriesKind,
};
use panel_chart::ChartConverter;
use serde_json::json;

fn rows(json: &str) -> RawResultSet {
    RawResultSet::tabular_from_json_str(json).expect("decode rows")
}

fn panel(chart_type: ChartType, fields: PanelFields) -> PanelSchema {
    PanelSchema::new(chart_type).with_query(PanelQuery::new(fields))
}

fn tabular(schema: &PanelSchema, data: &RawResultSet) -> TabularChart {
    convert_panel(schema, data)
        .as_tabular()
        .cloned()
        .expect("tabular chart")
}

fn host_fields() -> PanelFields {
    PanelFields::default()
        .with_x(FieldDescriptor::new("host").with_label("Host"))
        .with_y(FieldDescriptor::new("count").with_label("Requests"))
}

#[test]
fn histogram_line_becomes_a_time_series() {
    let schema = panel(
        ChartType::Line,
        PanelFields::default()
            .with_x(
                FieldDescriptor::new("t")
                    .with_aggregation("histogram")
                    .with_column("_timestamp"),
            )
            .with_y(FieldDescriptor::new("v")),
    );
    let data = rows(r#"[{"t":"2024-01-01T00:00:00","v":5},{"t":"2024-01-01T01:00:00","v":9}]"#);
    let chart = tabular(&schema, &data);

    assert_eq!(chart.option.series.len(), 1);
    assert_eq!(chart.option.x_axis.axis_type, AxisType::Time);
    assert!(chart.option.x_axis.categories().is_empty());
    assert_eq!(
        chart.option.series[0].data,
        SeriesData::Points(vec![
            (CellValue::Number(1_704_067_200_000.0), CellValue::Number(5.0)),
            (CellValue::Number(1_704_070_800_000.0), CellValue::Number(9.0)),
        ])
    );
    assert_eq!(chart.layout["xaxis"]["tickangle"], json!(0));
}

#[test]
fn histogram_over_other_columns_keeps_categories() {
    let schema = panel(
        ChartType::Bar,
        PanelFields::default()
            .with_x(FieldDescriptor::new("bucket").with_aggregation("histogram").with_column("size"))
            .with_y(FieldDescriptor::new("v")),
    );
    let data = rows(r#"[{"bucket":"small","v":1},{"bucket":"large","v":2}]"#);
    let chart = tabular(&schema, &data);
    assert_eq!(chart.option.x_axis.axis_type, AxisType::Category);
    assert_eq!(
        chart.option.x_axis.categories(),
        &[CellValue::text("small"), CellValue::text("large")]
    );
}

#[test]
fn bar_series_follow_y_columns() {
    let fields = host_fields().with_y(FieldDescriptor::new("errors").with_label("Errors"));
    let data = rows(
        r#"[{"host":"a","count":10,"errors":1},{"host":"b","count":20},{"host":"c","count":null,"errors":3}]"#,
    );
    let chart = tabular(&panel(ChartType::Bar, fields), &data);

    let names: Vec<_> = chart.option.series.iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, vec![Some("Requests".to_owned()), Some("Errors".to_owned())]);
    assert_eq!(
        chart.option.series[0].data,
        SeriesData::Values(vec![
            CellValue::Number(10.0),
            CellValue::Number(20.0),
            CellValue::Null
        ])
    );
    assert_eq!(chart.option.series[1].data.len(), 2);
    assert_eq!(chart.option.series[0].kind, SeriesKind::Bar);
    assert_eq!(chart.layout["barmode"], json!("group"));
    assert_eq!(chart.layout["yaxis"]["title"], json!(""));
    assert_eq!(chart.layout["xaxis"]["title"], json!("Host"));
}

#[test]
fn line_area_and_scatter_decorations() {
    let data = rows(r#"[{"host":"a","count":1}]"#);

    let line = tabular(&panel(ChartType::Line, host_fields()), &data);
    assert_eq!(line.option.series[0].smooth, Some(true));
    assert_eq!(line.option.series[0].kind, SeriesKind::Line);

    let area = tabular(&panel(ChartType::Area, host_fields()), &data);
    assert!(area.option.series[0].area_style.is_some());

    let scatter = tabular(&panel(ChartType::Scatter, host_fields()), &data);
    assert_eq!(scatter.option.series[0].symbol_size, Some(10));
    assert_eq!(scatter.layout["scattermode"], json!("group"));
}

#[test]
fn horizontal_bars_swap_axes() {
    let data = rows(r#"[{"host":"a","count":1},{"host":"b","count":2}]"#);
    let chart = tabular(&panel(ChartType::HBar, host_fields()), &data);

    assert_eq!(chart.option.x_axis.axis_type, AxisType::Value);
    assert_eq!(chart.option.y_axis.axis_type, AxisType::Category);
    assert_eq!(
        chart.option.y_axis.categories(),
        &[CellValue::text("a"), CellValue::text("b")]
    );
    assert_eq!(chart.option.category_axis(), &chart.option.y_axis);
}

#[test]
fn pie_slices_absorb_categories_in_lockstep() {
    let fields = host_fields().with_y(FieldDescriptor::new("errors"));
    let data = rows(r#"[{"host":"a","count":1,"errors":4},{"host":"b","count":2,"errors":5}]"#);
    let chart = tabular(&panel(ChartType::Pie, fields), &data);

    assert!(chart.option.x_axis.categories().is_empty());
    assert_eq!(chart.option.tooltip.trigger, TooltipTrigger::Item);
    let names = |index: usize| -> Vec<CellValue> {
        match &chart.option.series[index].data {
            SeriesData::Slices(slices) => slices.iter().map(|slice| slice.name.clone()).collect(),
            other => panic!("expected slices, got {other:?}"),
        }
    };
    let first = names(0);
    let second = names(1);
    assert_eq!(first, vec![CellValue::text("a"), CellValue::text("b")]);
    assert_eq!(second, vec![CellValue::Null, CellValue::Null]);

    let series = &chart.option.series[0];
    assert_eq!(series.kind, SeriesKind::Pie);
    assert_eq!(series.radius, Some(PieRadius::Disc("50%".to_owned())));
    let label = series.label.as_ref().expect("slice label");
    assert_eq!(label.formatter.as_deref(), Some("{d}%"));
    assert_eq!(chart.layout["legend"]["itemclick"], json!("toggle"));
}

#[test]
fn donut_uses_a_ring() {
    let data = rows(r#"[{"host":"a","count":1}]"#);
    let chart = tabular(&panel(ChartType::Donut, host_fields()), &data);
    let series = &chart.option.series[0];
    assert_eq!(
        series.radius,
        Some(PieRadius::Ring("40%".to_owned(), "70%".to_owned()))
    );
    assert_eq!(series.label_line.map(|line| line.show), Some(false));
}

fn stacked_fields() -> PanelFields {
    PanelFields::default()
        .with_x(FieldDescriptor::new("day"))
        .with_x(FieldDescriptor::new("status"))
        .with_y(FieldDescriptor::new("hits"))
}

#[test]
fn stacked_series_zero_fill_missing_pairs() {
    let data = rows(
        r#"[
            {"day":"mon","status":"ok","hits":5},
            {"day":"mon","status":"err","hits":1},
            {"day":"tue","status":"ok","hits":7},
            {"day":"mon","status":"ok","hits":99},
            {"day":"wed","status":"","hits":3}
        ]"#,
    );
    let chart = tabular(&panel(ChartType::Stacked, stacked_fields()), &data);

    assert_eq!(
        chart.option.x_axis.categories(),
        &[CellValue::text("mon"), CellValue::text("tue"), CellValue::text("wed")]
    );
    assert_eq!(chart.option.series.len(), 2);

    let ok = &chart.option.series[0];
    assert_eq!(ok.name.as_deref(), Some("ok"));
    assert_eq!(ok.stack.as_deref(), Some("total"));
    assert_eq!(
        ok.data,
        SeriesData::Values(vec![
            CellValue::Number(5.0),
            CellValue::Number(7.0),
            CellValue::Number(0.0)
        ])
    );
    let err = &chart.option.series[1];
    assert_eq!(
        err.data,
        SeriesData::Values(vec![
            CellValue::Number(1.0),
            CellValue::Number(0.0),
            CellValue::Number(0.0)
        ])
    );
    assert_eq!(chart.layout["barmode"], json!("stack"));
}

#[test]
fn area_stacked_and_horizontal_stacked_styles() {
    let data = rows(r#"[{"day":"mon","status":"ok","hits":5}]"#);

    let area = tabular(&panel(ChartType::AreaStacked, stacked_fields()), &data);
    assert_eq!(area.option.series[0].stack.as_deref(), Some("Total"));
    assert!(area.option.series[0].area_style.is_some());
    assert_eq!(area.option.series[0].kind, SeriesKind::Line);

    let horizontal = tabular(&panel(ChartType::HStacked, stacked_fields()), &data);
    assert_eq!(horizontal.option.y_axis.categories(), &[CellValue::text("mon")]);
    assert_eq!(horizontal.option.x_axis.axis_type, AxisType::Value);
    assert!(horizontal.layout["yaxis"].get("tickvals").is_none());
}

#[test]
fn stacked_without_discriminator_is_empty() {
    let data = rows(r#"[{"day":"mon","hits":5}]"#);
    let fields = PanelFields::default()
        .with_x(FieldDescriptor::new("day"))
        .with_y(FieldDescriptor::new("hits"));
    let chart = tabular(&panel(ChartType::Stacked, fields), &data);
    assert!(chart.option.series.is_empty());
}

#[test]
fn heatmap_leaves_gaps_for_missing_cells() {
    let fields = PanelFields::default()
        .with_x(FieldDescriptor::new("hour"))
        .with_y(FieldDescriptor::new("day"))
        .with_z(FieldDescriptor::new("load"));
    let data = rows(
        r#"[
            {"hour":"01","day":"mon","load":3},
            {"hour":"02","day":"mon","load":4},
            {"hour":"01","day":"tue","load":5}
        ]"#,
    );
    let chart = tabular(&panel(ChartType::Heatmap, fields), &data);

    assert_eq!(chart.option.series.len(), 1);
    let heatmap = &chart.option.series[0];
    assert_eq!(heatmap.kind, SeriesKind::Heatmap);
    assert_eq!(heatmap.hoverongaps, Some(false));
    assert_eq!(
        heatmap.data,
        SeriesData::Matrix(vec![
            vec![CellValue::Number(3.0), CellValue::Number(4.0)],
            vec![CellValue::Number(5.0), CellValue::Null],
        ])
    );
    assert_eq!(
        chart.option.y_axis.categories(),
        &[CellValue::text("mon"), CellValue::text("tue")]
    );
    assert_eq!(chart.layout["yaxis"]["width"], json!(700));
}

#[test]
fn heatmap_keeps_present_zero_cells() {
    let fields = PanelFields::default()
        .with_x(FieldDescriptor::new("hour"))
        .with_y(FieldDescriptor::new("day"))
        .with_z(FieldDescriptor::new("load"));
    let data = rows(
        r#"[
            {"hour":"01","day":"mon","load":0},
            {"hour":"02","day":"mon","load":4},
            {"hour":"01","day":"tue"}
        ]"#,
    );
    let chart = tabular(&panel(ChartType::Heatmap, fields), &data);

    assert_eq!(
        chart.option.series[0].data,
        SeriesData::Matrix(vec![
            vec![CellValue::Number(0.0), CellValue::Number(4.0)],
            vec![CellValue::Null, CellValue::Null],
        ])
    );
}

#[test]
fn huge_panel_width_is_capped_by_axis_length() {
    let data = rows(r#"[{"host":"h0","count":1},{"host":"h1","count":2}]"#);
    let converter = ChartConverter::new(ConvertOptions::new().with_panel_width(usize::MAX));
    let config = converter.convert(&panel(ChartType::Bar, host_fields()), &data);
    assert_eq!(config.layout()["xaxis"]["tickvals"], json!(["h0", "h1", "h1"]));
}

#[test]
fn metric_takes_first_value_or_zero() {
    let fields = PanelFields::default().with_y(FieldDescriptor::new("total"));
    let chart = tabular(
        &panel(ChartType::Metric, fields.clone()),
        &rows(r#"[{"total":42},{"total":7}]"#),
    );
    assert_eq!(chart.option.series[0].data, SeriesData::Scalar(CellValue::Number(42.0)));
    assert_eq!(chart.option.series[0].kind, SeriesKind::Indicator);
    assert_eq!(chart.layout["paper_bgcolor"], json!("white"));
    assert!(chart.layout.get("xaxis").is_none());

    let empty = tabular(&panel(ChartType::Metric, fields), &rows("[]"));
    assert_eq!(empty.option.series[0].data, SeriesData::Scalar(CellValue::Number(0.0)));
}

#[test]
fn unknown_chart_type_renders_no_series() {
    let schema: PanelSchema = PanelSchema::from_json_str(
        r#"{"type":"sankey","queries":[{"fields":{"x":[{"alias":"host"}],"y":[{"alias":"count"}]}}]}"#,
    )
    .expect("decode schema");
    assert_eq!(schema.chart_type, ChartType::Unknown);

    let chart = tabular(&schema, &rows(r#"[{"host":"a","count":1}]"#));
    assert!(chart.option.series.is_empty());
    assert_eq!(chart.layout["xaxis"]["tickvals"], json!(["a", "a"]));
}

#[test]
fn tick_budget_follows_panel_width() {
    let data = rows(
        r#"[{"host":"h0","count":0},{"host":"h1","count":1},{"host":"h2","count":2},
            {"host":"h3","count":3},{"host":"h4","count":4},{"host":"h5","count":5}]"#,
    );
    let converter = ChartConverter::new(ConvertOptions::new().with_panel_width(5));
    let config = converter.convert(&panel(ChartType::Bar, host_fields()), &data);
    assert_eq!(config.layout()["xaxis"]["tickvals"], json!(["h0", "h2", "h4", "h5"]));
    assert_eq!(config.layout()["xaxis"]["tickmode"], json!("array"));
}

#[test]
fn option_skeleton_matches_engine_expectations() {
    let chart = tabular(&panel(ChartType::Bar, host_fields()), &rows("[]"));
    let option = serde_json::to_value(&chart.option).expect("encode option");

    assert_eq!(option["legend"]["type"], json!("scroll"));
    assert_eq!(option["grid"]["containLabel"], json!(true));
    assert_eq!(option["tooltip"]["axisPointer"]["type"], json!("cross"));
    assert_eq!(option["xAxis"]["axisTick"]["alignWithLabel"], json!(true));
    assert_eq!(option["xAxis"]["min"], json!("dataMin"));
    assert_eq!(option["yAxis"]["type"], json!("value"));
    assert_eq!(option["dataZoom"][0]["xAxisIndex"], json!([0]));
}
