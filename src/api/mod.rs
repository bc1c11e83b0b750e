mod axis_ticks;
mod chart_output;
mod convert_config;
mod converter;
mod json_contract;
mod layout_builder;
mod legend_namer;
mod metric_pipeline;
mod tabular_pipeline;
mod theme;
mod timeseries;
mod unit_format;

pub use axis_ticks::{ValueTicks, sample_category_ticks, truncate_tick_label};
pub use chart_output::{
    AxisOption, AxisPointer, AxisTick, AxisType, ChartConfiguration, DataZoomOption,
    EChartsOption, EChartsSeries, Emphasis, GridOption, IndicatorNumber, IndicatorTrace,
    ItemShadow, LabelLine, LayoutFragment, LegendOption, PieRadius, PieSlice, Pipeline,
    PlotlyFigure, PlotlyTrace, SeriesData, SeriesLabel, SeriesTrace, SplitLine, TabularChart,
    TooltipOption, TooltipTrigger,
};
pub use convert_config::ConvertOptions;
pub use converter::{ChartConverter, convert_panel};
pub use json_contract::{CHART_CONFIGURATION_JSON_SCHEMA_V1, ChartConfigurationJsonContractV1};
pub use legend_namer::legend_name;
pub use tabular_pipeline::{AxisKeys, project_column};
pub use theme::{NoTheme, StaticTheme, ThemeLayoutProvider, ThemeMode};
pub use timeseries::{TimeAxisCorrection, is_iso_second_timestamp, parse_epoch_millis};
pub use unit_format::{ScaledValue, UnitFormatter, scale_value};
