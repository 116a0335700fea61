//! HTTP transport layer for the Zeus SDK.

use crate::config::ClientConfig;
use crate::error::{ZeusError, ZeusResult};
use bytes::Bytes;
use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Header naming the bucket a request is scoped to.
pub const BUCKET_HEADER: &str = "bucket-name";

/// Form or query parameters of a request.
pub type Params = Vec<(&'static str, String)>;

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> ZeusResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Return the body if the status is one of `expected`, otherwise turn
    /// the response into an API error.
    pub fn expect(self, expected: &[u16]) -> ZeusResult<Self> {
        if expected.contains(&self.status) {
            Ok(self)
        } else {
            Err(self.into_error())
        }
    }

    pub fn into_error(self) -> ZeusError {
        ZeusError::from_response(self.status, &self.body)
    }
}

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> ZeusResult<Self> {
        let mut headers = header::HeaderMap::new();

        if let Some(token) = config.token() {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| ZeusError::Config("Invalid token format".to_string()))?,
            );
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL from path segments. Segments are percent-encoded and
    /// the path always ends with a slash.
    fn build_url(&self, segments: &[&str]) -> ZeusResult<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ZeusError::Config("base_url cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    /// Perform one request. GET and DELETE send `params` as the query
    /// string, POST and PUT as a form-encoded body.
    ///
    /// Any status is returned as-is; only transport failures are errors.
    pub async fn request(
        &self,
        method: Method,
        segments: &[&str],
        bucket: Option<&str>,
        params: &[(&'static str, String)],
    ) -> ZeusResult<RawResponse> {
        let url = self.build_url(segments)?;
        debug!(method = %method, url = %url, "request");

        let mut request = self.client.request(method.clone(), url);

        if let Some(bucket) = bucket {
            let value = header::HeaderValue::from_str(bucket)
                .map_err(|_| ZeusError::InvalidInput(format!("invalid bucket name: {}", bucket)))?;
            request = request.header(BUCKET_HEADER, value);
        }

        if method == Method::POST || method == Method::PUT {
            request = request.form(params);
        } else if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(status = status, bytes = body.len(), "response");

        Ok(RawResponse { status, body })
    }
}
