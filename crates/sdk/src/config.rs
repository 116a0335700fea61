//! Configuration types for the Zeus SDK.

use std::time::Duration;
use url::Url;
use zeus_core::MetricEncoding;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Zeus client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Zeus REST API.
    pub base_url: Url,
    /// User token; scopes every endpoint path and is sent as a bearer token.
    pub token: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Layout used when posting metric points.
    pub metric_encoding: MetricEncoding,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
            timeout: DEFAULT_TIMEOUT,
            metric_encoding: MetricEncoding::default(),
        }
    }

    /// The configured token, if it is non-empty.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}
