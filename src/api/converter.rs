use tracing::debug;

use crate::core::{PanelSchema, RawResultSet};

use super::chart_output::ChartConfiguration;
use super::convert_config::ConvertOptions;
use super::metric_pipeline::convert_metric_results;
use super::tabular_pipeline::convert_tabular_rows;
use super::theme::{NoTheme, ThemeLayoutProvider};

/// Turns a panel schema plus query results into a renderable configuration.
///
/// The converter holds only options and a theme provider; every call derives
/// the full configuration from its inputs, so one instance can serve any
/// number of panels, including from several threads when `T: Sync`.
#[derive(Debug, Clone, Default)]
pub struct ChartConverter<T: ThemeLayoutProvider = NoTheme> {
    options: ConvertOptions,
    theme: T,
}

impl ChartConverter<NoTheme> {
    #[must_use]
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            theme: NoTheme,
        }
    }
}

impl<T: ThemeLayoutProvider> ChartConverter<T> {
    /// Replaces the theme provider; its fragment is merged into every layout.
    #[must_use]
    pub fn with_theme<U: ThemeLayoutProvider>(self, theme: U) -> ChartConverter<U> {
        ChartConverter {
            options: self.options,
            theme,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    #[must_use]
    pub fn theme(&self) -> &T {
        &self.theme
    }

    /// Runs the pipeline matching the result kind.
    ///
    /// Never fails: unknown chart types, unsupported result kinds and missing
    /// columns all degrade to fewer (possibly zero) series.
    #[must_use]
    pub fn convert(&self, schema: &PanelSchema, data: &RawResultSet) -> ChartConfiguration {
        debug!(chart_type = ?schema.chart_type, queries = schema.queries.len(), "convert panel");
        match data {
            RawResultSet::Metric(results) => ChartConfiguration::Metric(convert_metric_results(
                schema,
                results,
                &self.options,
                &self.theme,
            )),
            RawResultSet::Tabular(rows) => ChartConfiguration::Tabular(convert_tabular_rows(
                schema,
                rows,
                &self.options,
                &self.theme,
            )),
        }
    }
}

/// Converts with default options and no theme.
#[must_use]
pub fn convert_panel(schema: &PanelSchema, data: &RawResultSet) -> ChartConfiguration {
    ChartConverter::new(ConvertOptions::default()).convert(schema, data)
}
