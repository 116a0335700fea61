//! Metric ingestion, discovery, query and deletion endpoints.

use super::{push_num, push_str, successful};
use crate::client::Bucket;
use crate::error::{ZeusError, ZeusResult};
use crate::transport::Params;
use reqwest::Method;
use std::fmt;
use tracing::debug;
use zeus_core::codec::{self, format_timestamp};
use zeus_core::{DecodedSeriesMap, Series};

/// Acknowledgement the service sends after dropping a series.
const DELETION_ACK: &str = "Metric deletion successful";

/// Metrics API for sending and querying metric series.
pub struct MetricsApi<'a> {
    bucket: &'a Bucket<'a>,
}

impl<'a> MetricsApi<'a> {
    pub(crate) fn new(bucket: &'a Bucket<'a>) -> Self {
        Self { bucket }
    }

    /// Send the points of a series. Returns how many the service stored.
    pub async fn post(&self, series: &Series) -> ZeusResult<u64> {
        if series.name.is_empty() {
            return Err(ZeusError::InvalidInput("metric name is required".to_string()));
        }
        let encoded = codec::encode_with(series, self.bucket.metric_encoding())?;
        debug!(metric = %series.name, points = series.points.len(), "posting metrics");

        let params = vec![("metrics", encoded)];
        let response = self
            .bucket
            .request(Method::POST, "metrics", &[series.name.as_str()], &params)
            .await?;
        successful(response, &[200])
    }

    /// List metric names matching the query's name expression.
    pub async fn names(&self, query: &MetricNamesQuery) -> ZeusResult<Vec<String>> {
        let response = self
            .bucket
            .request(Method::GET, "metrics", &["_names"], &query.to_params())
            .await?
            .expect(&[200])?;
        response.json()
    }

    /// Query metric values as a single series: the first returned series,
    /// with its leading time column turned into point timestamps.
    pub async fn values(&self, query: &MetricValuesQuery) -> ZeusResult<Series> {
        let response = self.query_values(query).await?;
        Ok(codec::decode_series(&response)?)
    }

    /// Query metric values as per-column sequences keyed
    /// `"{series}_{column}"`.
    pub async fn columns(&self, query: &MetricValuesQuery) -> ZeusResult<DecodedSeriesMap> {
        let response = self.query_values(query).await?;
        Ok(codec::decode(&response)?)
    }

    async fn query_values(&self, query: &MetricValuesQuery) -> ZeusResult<bytes::Bytes> {
        let response = self
            .bucket
            .request(Method::GET, "metrics", &["_values"], &query.to_params())
            .await?
            .expect(&[200])?;
        Ok(response.body)
    }

    /// Delete an entire series. Returns whether the service confirmed it.
    pub async fn delete(&self, metric_name: &str) -> ZeusResult<bool> {
        if metric_name.is_empty() {
            return Err(ZeusError::InvalidInput("metric_name is required".to_string()));
        }

        let response = self
            .bucket
            .request(Method::DELETE, "metrics", &[metric_name], &[])
            .await?
            .expect(&[200])?;

        let messages: Vec<String> = response.json()?;
        Ok(messages.first().is_some_and(|m| m == DELETION_ACK))
    }
}

/// Metric name discovery constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricNamesQuery {
    /// Regular expression the names must match.
    pub metric_name: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl MetricNamesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matching(mut self, expression: impl Into<String>) -> Self {
        self.metric_name = Some(expression.into());
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        push_str(&mut params, "metric_name", &self.metric_name);
        push_num(&mut params, "offset", self.offset);
        push_num(&mut params, "limit", self.limit);
        params
    }
}

/// Aggregation applied to grouped metric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregator {
    Count,
    Min,
    Max,
    Sum,
    Mean,
    Mode,
    Median,
}

impl Aggregator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Min => "min",
            Self::Max => "max",
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Mode => "mode",
            Self::Median => "median",
        }
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric value query constraints.
///
/// Fields missing from a stored point are reported as 0 by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricValuesQuery {
    pub metric_name: Option<String>,
    pub aggregator: Option<Aggregator>,
    /// Column the aggregator is applied to.
    pub aggregator_column: Option<String>,
    /// Bucket width for grouping, e.g. `1s` or `5m`.
    pub group_interval: Option<String>,
    /// Epoch seconds.
    pub from: Option<f64>,
    /// Epoch seconds.
    pub to: Option<f64>,
    /// Filter such as `value > 0`.
    pub filter_condition: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl MetricValuesQuery {
    pub fn new(metric_name: impl Into<String>) -> Self {
        Self {
            metric_name: Some(metric_name.into()),
            ..Default::default()
        }
    }

    pub fn aggregate(mut self, aggregator: Aggregator, column: impl Into<String>) -> Self {
        self.aggregator = Some(aggregator);
        self.aggregator_column = Some(column.into());
        self
    }

    pub fn group_interval(mut self, interval: impl Into<String>) -> Self {
        self.group_interval = Some(interval.into());
        self
    }

    pub fn range(mut self, from: f64, to: f64) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn filter(mut self, condition: impl Into<String>) -> Self {
        self.filter_condition = Some(condition.into());
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        push_str(&mut params, "metric_name", &self.metric_name);
        if let Some(aggregator) = self.aggregator {
            params.push(("aggregator_function", aggregator.to_string()));
        }
        push_str(&mut params, "aggregator_column", &self.aggregator_column);
        push_str(&mut params, "group_interval", &self.group_interval);
        for (key, bound) in [("from", self.from), ("to", self.to)] {
            if let Some(bound) = bound.filter(|b| *b > 0.0) {
                params.push((key, format_timestamp(bound)));
            }
        }
        push_str(&mut params, "filter_condition", &self.filter_condition);
        push_num(&mut params, "offset", self.offset);
        push_num(&mut params, "limit", self.limit);
        params
    }
}
