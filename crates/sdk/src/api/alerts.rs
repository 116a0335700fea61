//! Alert rule management endpoints.

use super::successful;
use crate::client::Bucket;
use crate::error::{ZeusError, ZeusResult};
use crate::transport::Params;
use reqwest::Method;
use tracing::debug;
use zeus_core::{Alert, AlertId};

/// Alerts API for creating and managing alert rules.
pub struct AlertsApi<'a> {
    bucket: &'a Bucket<'a>,
}

impl<'a> AlertsApi<'a> {
    pub(crate) fn new(bucket: &'a Bucket<'a>) -> Self {
        Self { bucket }
    }

    /// Create an alert rule.
    pub async fn create(&self, alert: &Alert) -> ZeusResult<u64> {
        if !alert.is_complete() {
            return Err(ZeusError::InvalidInput(
                "alert_name and alert_expression are required".to_string(),
            ));
        }

        let response = self
            .bucket
            .request(Method::POST, "alerts", &[], &alert.to_form())
            .await?;
        successful(response, &[200, 201])
    }

    /// List alert rules, optionally only those watching `metric`.
    pub async fn list(&self, metric: Option<&str>) -> ZeusResult<Vec<Alert>> {
        let mut params = Params::new();
        if let Some(metric) = metric.filter(|m| !m.is_empty()) {
            params.push(("metric", metric.to_string()));
        }

        let response = self
            .bucket
            .request(Method::GET, "alerts", &[], &params)
            .await?
            .expect(&[200])?;
        response.json()
    }

    /// Get one alert rule.
    pub async fn get(&self, id: AlertId) -> ZeusResult<Alert> {
        let id = id.to_string();
        let response = self
            .bucket
            .request(Method::GET, "alerts", &[id.as_str()], &[])
            .await?
            .expect(&[200])?;
        response.json()
    }

    /// Replace the set fields of an alert rule.
    pub async fn update(&self, id: AlertId, alert: &Alert) -> ZeusResult<u64> {
        let form = alert.to_form();
        if form.is_empty() {
            return Err(ZeusError::InvalidInput(
                "alert has no fields to update".to_string(),
            ));
        }

        let id = id.to_string();
        let response = self
            .bucket
            .request(Method::PUT, "alerts", &[id.as_str()], &form)
            .await?;
        successful(response, &[200])
    }

    /// Delete an alert rule.
    pub async fn delete(&self, id: AlertId) -> ZeusResult<u64> {
        let id = id.to_string();
        let response = self
            .bucket
            .request(Method::DELETE, "alerts", &[id.as_str()], &[])
            .await?
            .expect(&[200, 204])?;

        // 204 carries no body.
        if response.status == 204 {
            return Ok(1);
        }
        successful(response, &[200])
    }

    /// Enable alert rules.
    pub async fn enable(&self, ids: &[AlertId]) -> ZeusResult<u64> {
        self.toggle("enable", ids).await
    }

    /// Disable alert rules.
    pub async fn disable(&self, ids: &[AlertId]) -> ZeusResult<u64> {
        self.toggle("disable", ids).await
    }

    async fn toggle(&self, action: &str, ids: &[AlertId]) -> ZeusResult<u64> {
        if ids.is_empty() {
            return Err(ZeusError::InvalidInput("no alert ids given".to_string()));
        }
        debug!(action = action, count = ids.len(), "toggling alerts");

        let params: Params = ids.iter().map(|id| ("id", id.to_string())).collect();
        let response = self
            .bucket
            .request(Method::POST, "alerts", &[action], &params)
            .await?;
        successful(response, &[200])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{client, client_without_token, form, BUCKET, TOKEN};
    use wiremock::matchers::{body_string, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_alert() -> Alert {
        Alert::new("cpu-high", "cpu.value > 20")
            .username("ops")
            .token("databucket")
            .alerts_type("metric")
            .severity("S1")
            .metric_name("cpu.value")
            .emails("blah@blah.com")
            .status("active")
            .frequency(30.0)
    }

    fn encoded_form(alert: &Alert) -> String {
        let pairs = alert.to_form();
        let pairs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
        form(&pairs)
    }

    #[tokio::test]
    async fn test_create_alert() {
        let server = MockServer::start().await;
        let alert = sample_alert();

        Mock::given(method("POST"))
            .and(path(format!("/alerts/{}/", TOKEN)))
            .and(body_string(encoded_form(&alert)))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"successful": 1}"#))
            .mount(&server)
            .await;

        let client = client(&server);
        let created = client.bucket(BUCKET).alerts().create(&alert).await.unwrap();
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_create_alert_preconditions() {
        let server = MockServer::start().await;

        let client = client(&server);
        let result = client.bucket(BUCKET).alerts().create(&Alert::default()).await;
        assert!(matches!(result, Err(ZeusError::InvalidInput(_))));

        let no_token = client_without_token(&server);
        let result = no_token.bucket(BUCKET).alerts().create(&sample_alert()).await;
        assert!(matches!(result, Err(ZeusError::MissingToken)));
    }

    #[tokio::test]
    async fn test_list_alerts() {
        let server = MockServer::start().await;
        let body = serde_json::to_string(&vec![sample_alert()]).unwrap();

        Mock::given(method("GET"))
            .and(path(format!("/alerts/{}/", TOKEN)))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let client = client(&server);
        let alerts = client.bucket(BUCKET).alerts().list(None).await.unwrap();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].token.as_deref(), Some("databucket"));
    }

    #[tokio::test]
    async fn test_list_alerts_by_metric() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/alerts/{}/", TOKEN)))
            .and(query_param("metric", "cpu.value"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let client = client(&server);
        let alerts = client
            .bucket(BUCKET)
            .alerts()
            .list(Some("cpu.value"))
            .await
            .unwrap();
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn test_get_alert() {
        let server = MockServer::start().await;
        let mut alert = sample_alert();
        alert.id = Some(AlertId(1));

        Mock::given(method("GET"))
            .and(path(format!("/alerts/{}/1/", TOKEN)))
            .respond_with(ResponseTemplate::new(200).set_body_json(&alert))
            .mount(&server)
            .await;

        let client = client(&server);
        let fetched = client.bucket(BUCKET).alerts().get(AlertId(1)).await.unwrap();
        assert_eq!(fetched, alert);
    }

    #[tokio::test]
    async fn test_update_alert() {
        let server = MockServer::start().await;
        let alert = sample_alert();

        Mock::given(method("PUT"))
            .and(path(format!("/alerts/{}/1/", TOKEN)))
            .and(body_string(encoded_form(&alert)))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"successful": 1}"#))
            .mount(&server)
            .await;

        let client = client(&server);
        let bucket = client.bucket(BUCKET);

        assert_eq!(bucket.alerts().update(AlertId(1), &alert).await.unwrap(), 1);

        let result = bucket.alerts().update(AlertId(1), &Alert::default()).await;
        assert!(matches!(result, Err(ZeusError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_delete_alert_no_content() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path(format!("/alerts/{}/1/", TOKEN)))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client(&server);
        let deleted = client.bucket(BUCKET).alerts().delete(AlertId(1)).await.unwrap();
        assert_eq!(deleted, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_alert() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path(format!("/alerts/{}/9/", TOKEN)))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"error": "alert not found"}"#),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        match client.bucket(BUCKET).alerts().delete(AlertId(9)).await {
            Err(ZeusError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "alert not found");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_enable_and_disable_alerts() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/alerts/{}/enable/", TOKEN)))
            .and(body_string("id=1&id=2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"successful": 2}"#))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/alerts/{}/disable/", TOKEN)))
            .and(body_string("id=3"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"successful": 1}"#))
            .mount(&server)
            .await;

        let client = client(&server);
        let bucket = client.bucket(BUCKET);

        assert_eq!(bucket.alerts().enable(&[AlertId(1), AlertId(2)]).await.unwrap(), 2);
        assert_eq!(bucket.alerts().disable(&[AlertId(3)]).await.unwrap(), 1);

        let result = bucket.alerts().enable(&[]).await;
        assert!(matches!(result, Err(ZeusError::InvalidInput(_))));
    }
}
