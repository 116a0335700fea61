//! Decoding of the service's columnar query responses.
//!
//! A response is a JSON array of `{name, columns, points}` objects where
//! every row in `points` lines up with `columns` and the first column is
//! conventionally `time`. Two views are offered:
//!
//! * [`decode`] pivots every element into per-column sequences keyed
//!   `"{name}_{column}"`, folding the `time` column into the `value` column.
//! * [`decode_series`] reads only the first element as a single [`Series`],
//!   treating the leading cell of each row as the point timestamp.

use crate::series::{
    series_key, ColumnarResponse, DataPoint, DecodedPoint, DecodedSeriesMap, Series, TIME_COLUMN,
    VALUE_COLUMN,
};

/// Errors raised while decoding a columnar response.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed columnar response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {row} has a null value at position {position}")]
    NullValue { row: usize, position: usize },
}

/// Parse a raw response body. A blank body is treated like `[]`.
pub fn parse(body: &[u8]) -> Result<Vec<ColumnarResponse>, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(body)?)
}

/// Decode a raw response body into per-column sequences.
pub fn decode(body: &[u8]) -> Result<DecodedSeriesMap, DecodeError> {
    let responses = parse(body)?;
    Ok(decode_responses(&responses))
}

/// Pivot parsed response elements into per-column sequences.
pub fn decode_responses(responses: &[ColumnarResponse]) -> DecodedSeriesMap {
    let mut decoded = DecodedSeriesMap::new();

    for response in responses {
        let name = response.name.as_deref().unwrap_or_default();
        let columns = response.columns.as_deref().unwrap_or_default();
        let rows = response.points.as_deref().unwrap_or_default();

        let keys: Vec<String> = columns
            .iter()
            .map(|column| series_key(name, column))
            .collect();
        for key in &keys {
            decoded.insert(key.clone(), vec![None; rows.len()]);
        }

        for (row_index, row) in rows.iter().enumerate() {
            // Short rows leave the trailing slots empty.
            for (key, cell) in keys.iter().zip(row) {
                if let (Some(value), Some(slots)) = (cell, decoded.get_mut(key)) {
                    slots[row_index] = Some(DecodedPoint::new(*value));
                }
            }
        }

        merge_time_into_value(&mut decoded, name);
    }

    decoded
}

/// Move the `time` column onto the `value` column of the same series,
/// pairing rows by position, and drop the `time` column.
fn merge_time_into_value(decoded: &mut DecodedSeriesMap, name: &str) {
    let value_key = series_key(name, VALUE_COLUMN);
    if !decoded.contains_key(&value_key) {
        return;
    }
    let Some(times) = decoded.remove(&series_key(name, TIME_COLUMN)) else {
        return;
    };

    if let Some(values) = decoded.get_mut(&value_key) {
        for (slot, time) in values.iter_mut().zip(times) {
            if let (Some(point), Some(time)) = (slot.as_mut(), time) {
                point.timestamp = Some(time.value as i64);
            }
        }
    }
}

/// Decode the first element of a raw response body as a single series.
pub fn decode_series(body: &[u8]) -> Result<Series, DecodeError> {
    let responses = parse(body)?;
    match responses.first() {
        Some(first) => series_from_response(first),
        None => Ok(Series::default()),
    }
}

/// Read one response element as a series.
///
/// The leading column is the timestamp column, so it is dropped from the
/// series columns and its cell becomes the point timestamp.
pub fn series_from_response(response: &ColumnarResponse) -> Result<Series, DecodeError> {
    let mut series = Series::default();

    if let Some(ref name) = response.name {
        series.name = name.clone();
    }
    if let Some(ref columns) = response.columns {
        series.columns = columns.iter().skip(1).cloned().collect();
    }

    let Some(ref rows) = response.points else {
        return Ok(series);
    };

    let width = response
        .columns
        .as_ref()
        .map(|_| series.columns.len())
        .unwrap_or(usize::MAX);

    series.points = rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let Some((timestamp, cells)) = row.split_first() else {
                return Ok(DataPoint::default());
            };

            let values = cells
                .iter()
                .take(width)
                .enumerate()
                .map(|(i, cell)| {
                    cell.ok_or(DecodeError::NullValue {
                        row: row_index,
                        position: i + 1,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(DataPoint {
                timestamp: *timestamp,
                values,
            })
        })
        .collect::<Result<_, DecodeError>>()?;

    Ok(series)
}
