use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Errors raised at the decoding/encoding boundary.
///
/// Conversion itself never fails; malformed-but-decodable input degrades to an
/// empty or partial configuration instead.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid json for {context}: {source}")]
    InvalidJson {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to serialize configuration: {0}")]
    Serialization(String),
}

impl ChartError {
    pub(crate) fn invalid_json(context: &'static str, source: serde_json::Error) -> Self {
        Self::InvalidJson { context, source }
    }
}
