use criterion::{Criterion, criterion_group, criterion_main};
use panel_chart::api::{ChartConverter, ConvertOptions, scale_value};
use panel_chart::core::{
    CellValue, ChartType, FieldDescriptor, LabelSet, MatrixSeries, MetricQueryResult, PanelConfig,
    PanelFields, PanelQuery, PanelSchema, RawResultSet, Sample, TabularRow, UnitFamily,
};
use std::hint::black_box;

fn histogram_rows(count: usize) -> RawResultSet {
    let rows = (0..count)
        .map(|i| {
            let mut row = TabularRow::new();
            row.insert(
                "t".to_owned(),
                CellValue::text(format!("2024-01-01T{:02}:{:02}:00", (i / 60) % 24, i % 60)),
            );
            row.insert("status".to_owned(), CellValue::text(format!("s{}", i % 4)));
            row.insert("hits".to_owned(), CellValue::Number((i % 97) as f64));
            row
        })
        .collect();
    RawResultSet::Tabular(rows)
}

fn range_vectors(series: usize, samples: usize) -> RawResultSet {
    let result = (0..series)
        .map(|s| MatrixSeries {
            metric: [("instance", format!("i-{s}"))].into_iter().collect::<LabelSet>(),
            values: (0..samples)
                .rev()
                .map(|i| Sample::new(1_700_000_000.0 + i as f64 * 15.0, (i * (s + 1)) as f64))
                .collect(),
        })
        .collect();
    RawResultSet::Metric(vec![MetricQueryResult::Matrix { result }])
}

fn bench_stacked_tabular_1k(c: &mut Criterion) {
    let schema = PanelSchema::new(ChartType::Stacked).with_query(PanelQuery::new(
        PanelFields::default()
            .with_x(
                FieldDescriptor::new("t")
                    .with_aggregation("histogram")
                    .with_column("_timestamp"),
            )
            .with_x(FieldDescriptor::new("status"))
            .with_y(FieldDescriptor::new("hits")),
    ));
    let data = histogram_rows(1_000);
    let converter = ChartConverter::new(ConvertOptions::default());

    c.bench_function("stacked_tabular_1k", |b| {
        b.iter(|| {
            let _ = converter.convert(black_box(&schema), black_box(&data));
        })
    });
}

fn bench_line_tabular_1k(c: &mut Criterion) {
    let schema = PanelSchema::new(ChartType::Line).with_query(PanelQuery::new(
        PanelFields::default()
            .with_x(
                FieldDescriptor::new("t")
                    .with_aggregation("histogram")
                    .with_column("_timestamp"),
            )
            .with_y(FieldDescriptor::new("hits")),
    ));
    let data = histogram_rows(1_000);
    let converter = ChartConverter::new(ConvertOptions::default());

    c.bench_function("line_tabular_1k", |b| {
        b.iter(|| {
            let _ = converter.convert(black_box(&schema), black_box(&data));
        })
    });
}

fn bench_area_stacked_metric_20x500(c: &mut Criterion) {
    let schema = PanelSchema::new(ChartType::AreaStacked)
        .with_query(PanelQuery::default().with_legend_template("{instance}"))
        .with_config(PanelConfig::default().with_unit(UnitFamily::Bps));
    let data = range_vectors(20, 500);
    let converter = ChartConverter::new(ConvertOptions::default());

    c.bench_function("area_stacked_metric_20x500", |b| {
        b.iter(|| {
            let _ = converter.convert(black_box(&schema), black_box(&data));
        })
    });
}

fn bench_unit_scaling(c: &mut Criterion) {
    c.bench_function("unit_scaling_bytes_and_seconds", |b| {
        b.iter(|| {
            let _ = scale_value(black_box(3_221_225_472.0), Some(UnitFamily::Bytes), None);
            let _ = scale_value(black_box(93_600.0), Some(UnitFamily::Seconds), None);
        })
    });
}

criterion_group!(
    benches,
    bench_stacked_tabular_1k,
    bench_line_tabular_1k,
    bench_area_stacked_metric_20x500,
    bench_unit_scaling
);
criterion_main!(benches);
