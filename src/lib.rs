//! panel-chart-rs: dashboard panel to chart configuration conversion.
//!
//! A panel schema plus the results of its queries go in; a configuration for
//! an external charting engine comes out. Metric (Prometheus-style) results
//! produce Plotly-style `{traces, layout}` figures, tabular (SQL-style) rows
//! produce an ECharts `option` with its layout. Conversion is a pure function
//! of its inputs and never fails; errors only arise when decoding or encoding
//! JSON at the boundary.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{ChartConfiguration, ChartConverter, ConvertOptions, convert_panel};
pub use error::{ChartError, ChartResult};
