pub mod cell;
pub mod chart_type;
pub mod result_set;
pub mod schema;

pub use cell::CellValue;
pub use chart_type::{
    BarMode, ChartType, ChartTypeProfile, DataShape, FillMode, LayoutProfile, MarkType,
    Orientation, PieStyle, ScatterMode, SeriesKind, SeriesStyle, TickPlacement, TraceMode,
    TraceStyle,
};
pub use result_set::{
    LabelSet, MatrixSeries, MetricQueryResult, RawResultSet, Sample, TabularRow, VectorSeries,
};
pub use schema::{
    FieldDescriptor, LegendPosition, PanelConfig, PanelFields, PanelQuery, PanelSchema,
    UnitFamily,
};
