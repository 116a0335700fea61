//! Main client for the Zeus SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{ZeusError, ZeusResult};
use crate::transport::{HttpTransport, RawResponse};
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use zeus_core::MetricEncoding;

/// Main client for interacting with the Zeus API.
#[derive(Debug, Clone)]
pub struct ZeusClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl ZeusClient {
    /// Create a new client builder.
    pub fn builder() -> ZeusClientBuilder {
        ZeusClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> ZeusResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Scope requests to a bucket, e.g. `"org1/bucket1"`.
    pub fn bucket(&self, name: impl Into<String>) -> Bucket<'_> {
        Bucket {
            client: self,
            name: name.into(),
        }
    }
}

/// Requests scoped to one bucket of the client's organization.
#[derive(Debug, Clone)]
pub struct Bucket<'a> {
    client: &'a ZeusClient,
    name: String,
}

impl<'a> Bucket<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the logs API.
    pub fn logs(&self) -> LogsApi<'_> {
        LogsApi::new(self)
    }

    /// Get the metrics API.
    pub fn metrics(&self) -> MetricsApi<'_> {
        MetricsApi::new(self)
    }

    /// Get the alerts API.
    pub fn alerts(&self) -> AlertsApi<'_> {
        AlertsApi::new(self)
    }

    /// Get the triggered alerts API.
    pub fn trigalerts(&self) -> TrigalertsApi<'_> {
        TrigalertsApi::new(self)
    }

    pub(crate) fn metric_encoding(&self) -> MetricEncoding {
        self.client.config.metric_encoding
    }

    /// Issue a request under `/{resource}/{token}/{rest..}/`.
    pub(crate) async fn request(
        &self,
        method: Method,
        resource: &str,
        rest: &[&str],
        params: &[(&'static str, String)],
    ) -> ZeusResult<RawResponse> {
        let token = self.client.config.token().ok_or(ZeusError::MissingToken)?;
        if self.name.is_empty() {
            return Err(ZeusError::InvalidInput("bucket name is required".to_string()));
        }

        let mut segments = Vec::with_capacity(rest.len() + 2);
        segments.push(resource);
        segments.push(token);
        segments.extend_from_slice(rest);

        self.client
            .http
            .request(method, &segments, Some(&self.name), params)
            .await
    }
}

/// Builder for creating a ZeusClient.
pub struct ZeusClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    timeout: Duration,
    metric_encoding: MetricEncoding,
}

impl ZeusClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout: DEFAULT_TIMEOUT,
            metric_encoding: MetricEncoding::default(),
        }
    }

    /// Set the base URL of the Zeus REST API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the user token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the layout used when posting metrics.
    pub fn metric_encoding(mut self, encoding: MetricEncoding) -> Self {
        self.metric_encoding = encoding;
        self
    }

    /// Build the client.
    pub fn build(self) -> ZeusResult<ZeusClient> {
        let base_url_str = self
            .base_url
            .ok_or_else(|| ZeusError::Config("base_url is required".to_string()))?;

        let base_url = Url::parse(&base_url_str)?;
        if base_url.cannot_be_a_base() {
            return Err(ZeusError::Config(format!(
                "base_url must be a hierarchical URL: {}",
                base_url
            )));
        }

        let config = ClientConfig {
            base_url,
            token: self.token,
            timeout: self.timeout,
            metric_encoding: self.metric_encoding,
        };

        ZeusClient::from_config(config)
    }
}

impl Default for ZeusClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
