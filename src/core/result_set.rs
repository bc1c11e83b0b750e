use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::CellValue;

/// Label set identifying one metric series, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(pub IndexMap<String, String>);

impl LabelSet {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compact JSON rendering, used as a fallback series identifier.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_owned())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// One `[timestamp, value]` pair of a range or instant vector.
///
/// Timestamps are seconds since epoch. The value keeps its source text so the
/// indicator path can echo it verbatim; it is absent when the pair carried
/// only a timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: f64,
    pub raw_value: Option<String>,
}

impl Sample {
    #[must_use]
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self {
            timestamp,
            raw_value: Some(value.to_string()),
        }
    }

    /// Numeric value, `None` when missing or not a number.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.raw_value
            .as_deref()
            .and_then(|text| text.trim().parse::<f64>().ok())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_text(self) -> String {
        match self {
            NumberOrText::Number(value) => value.to_string(),
            NumberOrText::Text(text) => text,
        }
    }
}

impl<'de> Deserialize<'de> for Sample {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SampleVisitor;

        impl<'de> Visitor<'de> for SampleVisitor {
            type Value = Sample;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a [timestamp, value] pair")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let timestamp = match seq.next_element::<NumberOrText>()? {
                    Some(NumberOrText::Number(value)) => value,
                    Some(NumberOrText::Text(text)) => text.trim().parse::<f64>().map_err(|_| {
                        de::Error::custom(format!("sample timestamp is not numeric: {text}"))
                    })?,
                    None => return Err(de::Error::invalid_length(0, &self)),
                };
                let raw_value = seq
                    .next_element::<Option<NumberOrText>>()?
                    .flatten()
                    .map(NumberOrText::into_text);
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Sample {
                    timestamp,
                    raw_value,
                })
            }
        }

        deserializer.deserialize_seq(SampleVisitor)
    }
}

impl Serialize for Sample {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.raw_value {
            Some(value) => (self.timestamp, value).serialize(serializer),
            None => (self.timestamp,).serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixSeries {
    #[serde(default)]
    pub metric: LabelSet,
    #[serde(default)]
    pub values: Vec<Sample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSeries {
    #[serde(default)]
    pub metric: LabelSet,
    #[serde(default)]
    pub value: Option<Sample>,
}

/// Result of one executed metric sub-query.
///
/// Result types other than `matrix` and `vector` decode to
/// [`MetricQueryResult::Unsupported`] and contribute no series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resultType", rename_all = "lowercase")]
pub enum MetricQueryResult {
    Matrix {
        #[serde(default)]
        result: Vec<MatrixSeries>,
    },
    Vector {
        #[serde(default)]
        result: Vec<VectorSeries>,
    },
    #[serde(other)]
    Unsupported,
}

/// One tabular result row keyed by column alias.
pub type TabularRow = IndexMap<String, CellValue>;

/// Query output handed to the converter, tagged by the backend that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum RawResultSet {
    Metric(Vec<MetricQueryResult>),
    Tabular(Vec<TabularRow>),
}

impl RawResultSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            RawResultSet::Metric(results) => results.is_empty(),
            RawResultSet::Tabular(rows) => rows.is_empty(),
        }
    }
}
