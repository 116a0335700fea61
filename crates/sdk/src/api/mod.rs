//! Bucket-scoped API endpoints.

mod alerts;
mod logs;
mod metrics;
mod trigalerts;

pub use alerts::AlertsApi;
pub use logs::{LogPage, LogQuery, LogsApi};
pub use metrics::{Aggregator, MetricNamesQuery, MetricValuesQuery, MetricsApi};
pub use trigalerts::TrigalertsApi;

use crate::error::ZeusResult;
use crate::transport::{Params, RawResponse};
use serde::Deserialize;

/// Acknowledgement returned by write endpoints.
#[derive(Debug, Default, Deserialize)]
struct PostResponse {
    #[serde(default)]
    successful: u64,
}

/// Read the `successful` count from a write acknowledgement.
fn successful(response: RawResponse, expected: &[u16]) -> ZeusResult<u64> {
    let response = response.expect(expected)?;
    let ack: PostResponse = response.json()?;
    Ok(ack.successful)
}

/// Push `value` under `key` when it is set and non-empty.
fn push_str(params: &mut Params, key: &'static str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        params.push((key, value.to_string()));
    }
}

/// Push `value` under `key` when it is set and non-zero.
fn push_num<T>(params: &mut Params, key: &'static str, value: Option<T>)
where
    T: PartialEq + Default + ToString,
{
    if let Some(value) = value.filter(|v| *v != T::default()) {
        params.push((key, value.to_string()));
    }
}
