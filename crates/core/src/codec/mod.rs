//! Metric wire codec: per-point encoding for ingestion and columnar
//! decoding for queries.

pub mod decode;
pub mod encode;

pub use decode::{decode, decode_responses, decode_series, series_from_response, DecodeError};
pub use encode::{encode, encode_with, format_timestamp, EncodeError, MetricEncoding};
