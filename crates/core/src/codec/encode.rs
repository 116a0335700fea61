//! Serialization of a [`Series`] into the per-point JSON array accepted by
//! the metrics ingestion endpoint.

use crate::series::Series;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::value::RawValue;
use std::collections::HashSet;

/// Field carrying the optional point timestamp.
const TIMESTAMP_FIELD: &str = "timestamp";

/// Field wrapping the column values in the nested layout.
const POINT_FIELD: &str = "point";

/// Wire layout of an encoded point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetricEncoding {
    /// `{"col1": 1.0, "col2": 2.0, "timestamp": 100.000}`
    #[default]
    Flat,
    /// `{"point": {"col1": 1.0, "col2": 2.0}, "timestamp": 100.000}`
    Nested,
}

/// Errors raised while encoding a series.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("series has no columns or no points")]
    EmptyInput,

    #[error("point {index} has {found} values, expected {expected}")]
    ShapeMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("point {index} has a non-finite timestamp")]
    NonFiniteTimestamp { index: usize },

    #[error("point {index} has a non-finite value in column {column}")]
    NonFiniteValue { index: usize, column: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a series with the default flat layout.
pub fn encode(series: &Series) -> Result<String, EncodeError> {
    encode_with(series, MetricEncoding::Flat)
}

/// Encode a series into a JSON array with one object per point.
///
/// The whole series is validated before anything is written, so an error
/// never comes with partial output.
pub fn encode_with(series: &Series, encoding: MetricEncoding) -> Result<String, EncodeError> {
    validate(series, encoding)?;

    let points = series
        .points
        .iter()
        .map(|point| {
            let timestamp = point
                .timestamp
                .map(|ts| RawValue::from_string(format_timestamp(ts)))
                .transpose()?;

            Ok(EncodedPoint {
                columns: Columns {
                    names: &series.columns,
                    values: &point.values,
                },
                timestamp,
                encoding,
            })
        })
        .collect::<Result<Vec<_>, EncodeError>>()?;

    Ok(serde_json::to_string(&points)?)
}

/// Epoch seconds with exactly three decimal places.
pub fn format_timestamp(timestamp: f64) -> String {
    format!("{:.3}", timestamp)
}

fn validate(series: &Series, encoding: MetricEncoding) -> Result<(), EncodeError> {
    if series.columns.is_empty() || series.points.is_empty() {
        return Err(EncodeError::EmptyInput);
    }

    // Flat points share one object with the timestamp field.
    let mut seen = HashSet::with_capacity(series.columns.len() + 1);
    if encoding == MetricEncoding::Flat {
        seen.insert(TIMESTAMP_FIELD);
    }
    for column in &series.columns {
        if !seen.insert(column.as_str()) {
            return Err(EncodeError::DuplicateColumn(column.clone()));
        }
    }

    let expected = series.columns.len();
    for (index, point) in series.points.iter().enumerate() {
        if point.values.len() != expected {
            return Err(EncodeError::ShapeMismatch {
                index,
                expected,
                found: point.values.len(),
            });
        }
        if point.timestamp.is_some_and(|ts| !ts.is_finite()) {
            return Err(EncodeError::NonFiniteTimestamp { index });
        }
        if let Some(position) = point.values.iter().position(|v| !v.is_finite()) {
            return Err(EncodeError::NonFiniteValue {
                index,
                column: series.columns[position].clone(),
            });
        }
    }

    Ok(())
}

/// Column values of one point, written in column order.
struct Columns<'a> {
    names: &'a [String],
    values: &'a [f64],
}

impl Columns<'_> {
    fn write_entries<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        for (name, value) in self.names.iter().zip(self.values) {
            map.serialize_entry(name, value)?;
        }
        Ok(())
    }
}

impl Serialize for Columns<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.names.len()))?;
        self.write_entries(&mut map)?;
        map.end()
    }
}

struct EncodedPoint<'a> {
    columns: Columns<'a>,
    timestamp: Option<Box<RawValue>>,
    encoding: MetricEncoding,
}

impl Serialize for EncodedPoint<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.timestamp.is_some());
        match self.encoding {
            MetricEncoding::Flat => {
                let mut map = serializer.serialize_map(Some(self.columns.names.len() + extra))?;
                self.columns.write_entries(&mut map)?;
                if let Some(ref timestamp) = self.timestamp {
                    map.serialize_entry(TIMESTAMP_FIELD, timestamp)?;
                }
                map.end()
            }
            MetricEncoding::Nested => {
                let mut map = serializer.serialize_map(Some(1 + extra))?;
                map.serialize_entry(POINT_FIELD, &self.columns)?;
                if let Some(ref timestamp) = self.timestamp {
                    map.serialize_entry(TIMESTAMP_FIELD, timestamp)?;
                }
                map.end()
            }
        }
    }
}
