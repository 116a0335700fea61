//! Triggered alert history endpoints.

use crate::client::Bucket;
use crate::error::ZeusResult;
use reqwest::Method;
use serde_json::Value;

/// Triggered alerts API. The payload shape is owned by the service and is
/// returned untouched.
pub struct TrigalertsApi<'a> {
    bucket: &'a Bucket<'a>,
}

impl<'a> TrigalertsApi<'a> {
    pub(crate) fn new(bucket: &'a Bucket<'a>) -> Self {
        Self { bucket }
    }

    /// All triggered alerts.
    pub async fn all(&self) -> ZeusResult<Value> {
        self.fetch(&[]).await
    }

    /// Alerts triggered during the last 24 hours.
    pub async fn last_24h(&self) -> ZeusResult<Value> {
        self.fetch(&["last24"]).await
    }

    async fn fetch(&self, rest: &[&str]) -> ZeusResult<Value> {
        let response = self
            .bucket
            .request(Method::GET, "trigalerts", rest, &[])
            .await?
            .expect(&[200])?;
        response.json()
    }
}
