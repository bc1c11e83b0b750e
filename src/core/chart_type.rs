use serde::{Deserialize, Serialize};

/// Chart types a panel can request.
///
/// Unrecognized names decode to [`ChartType::Unknown`], which renders with the
/// bar styling and produces no series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Scatter,
    Pie,
    Donut,
    HBar,
    Area,
    Stacked,
    AreaStacked,
    Heatmap,
    HStacked,
    Metric,
    #[serde(other)]
    Unknown,
}

impl ChartType {
    pub const ALL: [ChartType; 12] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Scatter,
        ChartType::Pie,
        ChartType::Donut,
        ChartType::HBar,
        ChartType::Area,
        ChartType::Stacked,
        ChartType::AreaStacked,
        ChartType::Heatmap,
        ChartType::HStacked,
        ChartType::Metric,
    ];

    /// Resolves the styling, layout and data-shaping strategies for this chart
    /// type. Pipelines call this once per conversion.
    #[must_use]
    pub const fn profile(self) -> ChartTypeProfile {
        use DataShape as D;
        use MarkType as M;

        match self {
            ChartType::Bar => ChartTypeProfile {
                trace: TraceStyle::mark(M::Bar),
                series: SeriesStyle::plain(SeriesKind::Bar),
                layout: LayoutProfile::grouped_bars(),
                shape: D::PerValueColumn,
            },
            ChartType::Line => ChartTypeProfile {
                trace: TraceStyle::mode(TraceMode::Lines),
                series: SeriesStyle {
                    smooth: true,
                    ..SeriesStyle::plain(SeriesKind::Line)
                },
                layout: LayoutProfile::category(TickPlacement::CategoryAxisWhenSingleX),
                shape: D::PerValueColumn,
            },
            ChartType::Scatter => ChartTypeProfile {
                trace: TraceStyle::mode(TraceMode::Markers),
                series: SeriesStyle {
                    symbol_size: Some(10),
                    ..SeriesStyle::plain(SeriesKind::Scatter)
                },
                layout: LayoutProfile {
                    scatter_mode: Some(ScatterMode::Group),
                    ..LayoutProfile::category(TickPlacement::CategoryAxisWhenSingleX)
                },
                shape: D::PerValueColumn,
            },
            ChartType::Pie => ChartTypeProfile {
                trace: TraceStyle::mark(M::Pie),
                series: SeriesStyle {
                    pie: Some(PieStyle::Filled),
                    ..SeriesStyle::plain(SeriesKind::Pie)
                },
                layout: LayoutProfile::slices(),
                shape: D::PieSlices,
            },
            ChartType::Donut => ChartTypeProfile {
                trace: TraceStyle::mark(M::Pie),
                series: SeriesStyle {
                    pie: Some(PieStyle::Ring),
                    ..SeriesStyle::plain(SeriesKind::Pie)
                },
                layout: LayoutProfile::slices(),
                shape: D::PieSlices,
            },
            ChartType::HBar => ChartTypeProfile {
                trace: TraceStyle {
                    orientation: Some(Orientation::H),
                    ..TraceStyle::mark(M::Bar)
                },
                series: SeriesStyle::plain(SeriesKind::Bar),
                layout: LayoutProfile {
                    swapped_axes: true,
                    ..LayoutProfile::grouped_bars()
                },
                shape: D::PerValueColumn,
            },
            ChartType::Area => ChartTypeProfile {
                trace: TraceStyle {
                    fill: Some(FillMode::ToZeroY),
                    ..TraceStyle::mark(M::Scatter)
                },
                series: SeriesStyle {
                    area_fill: true,
                    ..SeriesStyle::plain(SeriesKind::Line)
                },
                layout: LayoutProfile::category(TickPlacement::CategoryAxisWhenSingleX),
                shape: D::PerValueColumn,
            },
            ChartType::Stacked => ChartTypeProfile {
                trace: TraceStyle::mark(M::Bar),
                series: SeriesStyle::stacked(SeriesKind::Bar, "total", false),
                layout: LayoutProfile::stacked(false),
                shape: D::Stacked,
            },
            ChartType::AreaStacked => ChartTypeProfile {
                trace: TraceStyle::mode(TraceMode::Lines),
                series: SeriesStyle::stacked(SeriesKind::Line, "Total", true),
                layout: LayoutProfile::stacked(false),
                shape: D::Stacked,
            },
            ChartType::Heatmap => ChartTypeProfile {
                trace: TraceStyle::mark(M::Heatmap),
                series: SeriesStyle::plain(SeriesKind::Heatmap),
                layout: LayoutProfile::category(TickPlacement::CategoryAxisUnlessHistogram),
                shape: D::Heatmap,
            },
            ChartType::HStacked => ChartTypeProfile {
                trace: TraceStyle {
                    orientation: Some(Orientation::H),
                    ..TraceStyle::mark(M::Bar)
                },
                series: SeriesStyle::stacked(SeriesKind::Bar, "total", false),
                layout: LayoutProfile::stacked(true),
                shape: D::Stacked,
            },
            ChartType::Metric => ChartTypeProfile {
                trace: TraceStyle {
                    mode: Some(TraceMode::Number),
                    ..TraceStyle::mark(M::Indicator)
                },
                series: SeriesStyle::plain(SeriesKind::Indicator),
                layout: LayoutProfile::category(TickPlacement::None),
                shape: D::Indicator,
            },
            ChartType::Unknown => ChartTypeProfile {
                trace: TraceStyle::mark(M::Bar),
                series: SeriesStyle::plain(SeriesKind::Bar),
                layout: LayoutProfile::category(TickPlacement::CategoryAxisAlways),
                shape: D::None,
            },
        }
    }
}

/// The three cooperating strategies selected for one chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartTypeProfile {
    /// Trace decoration for the metric (Plotly-style) pipeline.
    pub trace: TraceStyle,
    /// Series decoration for the tabular pipeline.
    pub series: SeriesStyle,
    pub layout: LayoutProfile,
    pub shape: DataShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Bar,
    Scatter,
    Pie,
    Heatmap,
    Indicator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    Lines,
    Markers,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillMode {
    #[serde(rename = "tozeroy")]
    ToZeroY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    H,
    V,
}

/// Plotly trace decoration; unset fields are omitted from the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStyle {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mark: Option<MarkType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<TraceMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
}

impl TraceStyle {
    const fn mark(mark: MarkType) -> Self {
        Self {
            mark: Some(mark),
            mode: None,
            fill: None,
            orientation: None,
        }
    }

    const fn mode(mode: TraceMode) -> Self {
        Self {
            mark: None,
            mode: Some(mode),
            fill: None,
            orientation: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    Line,
    Scatter,
    Pie,
    Heatmap,
    Indicator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieStyle {
    /// Full disc with a drop shadow on hover.
    Filled,
    /// Ring between 40% and 70% of the radius.
    Ring,
}

/// Series decoration for the tabular pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    pub kind: SeriesKind,
    pub smooth: bool,
    pub area_fill: bool,
    pub stack: Option<&'static str>,
    pub focus_series: bool,
    pub symbol_size: Option<u32>,
    pub pie: Option<PieStyle>,
}

impl SeriesStyle {
    const fn plain(kind: SeriesKind) -> Self {
        Self {
            kind,
            smooth: false,
            area_fill: false,
            stack: None,
            focus_series: false,
            symbol_size: None,
            pie: None,
        }
    }

    const fn stacked(kind: SeriesKind, group: &'static str, area_fill: bool) -> Self {
        Self {
            kind,
            smooth: false,
            area_fill,
            stack: Some(group),
            focus_series: true,
            symbol_size: None,
            pie: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Group,
    Stack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScatterMode {
    Group,
}

/// Where sampled tick values/text are attached in the tabular layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPlacement {
    /// On the category axis when exactly one x field is configured.
    CategoryAxisWhenSingleX,
    /// On the category axis unless the first x field is a histogram.
    CategoryAxisUnlessHistogram,
    /// On the category axis unconditionally.
    CategoryAxisAlways,
    /// On the y axis (slice charts keep no category axis of their own).
    ValueAxis,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutProfile {
    pub bar_mode: Option<BarMode>,
    pub scatter_mode: Option<ScatterMode>,
    /// Category axis rendered vertically, values horizontally.
    pub swapped_axes: bool,
    pub ticks: TickPlacement,
    /// Slice charts: item tooltips and toggling legend entries.
    pub item_focused: bool,
}

impl LayoutProfile {
    const fn category(ticks: TickPlacement) -> Self {
        Self {
            bar_mode: None,
            scatter_mode: None,
            swapped_axes: false,
            ticks,
            item_focused: false,
        }
    }

    const fn grouped_bars() -> Self {
        Self {
            bar_mode: Some(BarMode::Group),
            ..Self::category(TickPlacement::CategoryAxisWhenSingleX)
        }
    }

    const fn stacked(swapped_axes: bool) -> Self {
        Self {
            bar_mode: Some(BarMode::Stack),
            swapped_axes,
            ticks: if swapped_axes {
                TickPlacement::None
            } else {
                TickPlacement::CategoryAxisUnlessHistogram
            },
            scatter_mode: None,
            item_focused: false,
        }
    }

    const fn slices() -> Self {
        Self {
            item_focused: true,
            ..Self::category(TickPlacement::ValueAxis)
        }
    }
}

/// How tabular rows are shaped into series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataShape {
    /// One series per y column, aligned with the category axis.
    PerValueColumn,
    /// One series per y column whose points absorb the category labels.
    PieSlices,
    /// One series per distinct discriminator value, zero-filled.
    Stacked,
    /// A single z-value matrix over two distinct-value axes.
    Heatmap,
    /// A single scalar.
    Indicator,
    None,
}
