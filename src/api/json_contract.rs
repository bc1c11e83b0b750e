use serde::Serialize;

use crate::core::{MetricQueryResult, PanelSchema, RawResultSet, TabularRow};
use crate::error::{ChartError, ChartResult};

use super::chart_output::{ChartConfiguration, Pipeline};

pub const CHART_CONFIGURATION_JSON_SCHEMA_V1: u32 = 1;

/// Versioned envelope around a serialized configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfigurationJsonContractV1<'a> {
    pub schema_version: u32,
    pub pipeline: Pipeline,
    pub configuration: &'a ChartConfiguration,
}

impl PanelSchema {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| ChartError::invalid_json("panel schema", e))
    }
}

impl RawResultSet {
    /// Decodes a JSON array of metric query results (`resultType` tagged).
    pub fn metric_from_json_str(input: &str) -> ChartResult<Self> {
        let results: Vec<MetricQueryResult> = serde_json::from_str(input)
            .map_err(|e| ChartError::invalid_json("metric query results", e))?;
        Ok(Self::Metric(results))
    }

    /// Decodes a JSON array of row objects keyed by column alias.
    pub fn tabular_from_json_str(input: &str) -> ChartResult<Self> {
        let rows: Vec<TabularRow> = serde_json::from_str(input)
            .map_err(|e| ChartError::invalid_json("tabular rows", e))?;
        Ok(Self::Tabular(rows))
    }
}

impl ChartConfiguration {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize chart configuration: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartConfigurationJsonContractV1 {
            schema_version: CHART_CONFIGURATION_JSON_SCHEMA_V1,
            pipeline: self.pipeline(),
            configuration: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::Serialization(format!(
                "failed to serialize chart configuration contract v1: {e}"
            ))
        })
    }
}
