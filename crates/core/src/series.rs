use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the column the service uses to ship point timestamps.
pub const TIME_COLUMN: &str = "time";

/// Name of the column that receives timestamps during decoding.
pub const VALUE_COLUMN: &str = "value";

/// A single metric data point: one value per series column.
///
/// Points decoded from a ragged query response may carry fewer values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Epoch seconds; sub-second precision is kept to milliseconds on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    pub values: Vec<f64>,
}

impl DataPoint {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            timestamp: None,
            values: values.into(),
        }
    }

    /// Attach an epoch-seconds timestamp.
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach a timestamp from a UTC date, keeping millisecond precision.
    pub fn at(self, time: DateTime<Utc>) -> Self {
        self.with_timestamp(time.timestamp_millis() as f64 / 1000.0)
    }
}

/// A named metric series with its dimension columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub columns: Vec<String>,
    pub points: Vec<DataPoint>,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_point(mut self, point: DataPoint) -> Self {
        self.points.push(point);
        self
    }

    pub fn push(&mut self, point: DataPoint) {
        self.points.push(point);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One element of the service's columnar query response.
///
/// Every field is optional because the service has emitted inconsistent
/// shapes across releases; a missing field decodes to nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnarResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    /// `null` cells are kept as `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Vec<Option<f64>>>>,
}

impl ColumnarResponse {
    /// Render a series the way the service echoes it back from a query:
    /// a leading `time` column followed by the series columns.
    ///
    /// Points without a timestamp get a `null` time cell.
    pub fn from_series(series: &Series) -> Self {
        let columns = std::iter::once(TIME_COLUMN.to_string())
            .chain(series.columns.iter().cloned())
            .collect();

        let points = series
            .points
            .iter()
            .map(|point| {
                std::iter::once(point.timestamp)
                    .chain(point.values.iter().copied().map(Some))
                    .collect()
            })
            .collect();

        Self {
            name: Some(series.name.clone()),
            columns: Some(columns),
            points: Some(points),
        }
    }
}

/// A decoded cell, optionally paired with the timestamp of its row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodedPoint {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl DecodedPoint {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            timestamp: None,
        }
    }
}

/// Decoded columns keyed by `"{series}_{column}"`.
///
/// Each sequence has one slot per response row. A slot is `None` when the
/// row had no cell for that column.
pub type DecodedSeriesMap = BTreeMap<String, Vec<Option<DecodedPoint>>>;

/// Key under which a series column is stored in a [`DecodedSeriesMap`].
pub fn series_key(name: &str, column: &str) -> String {
    format!("{}_{}", name, column)
}
